use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

impl fmt::Display for ToastVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Destructive => write!(f, "destructive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn load_failed() -> Self {
        Self {
            title: "Error loading pdf".to_string(),
            description: "Please try again later".to_string(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Transient notifications shown over the viewer, oldest first.
#[derive(Debug, Default)]
pub struct Toasts {
    shown: Vec<(ToastId, Toast)>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, toast: Toast) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        tracing::debug!(title = %toast.title, variant = %toast.variant, "toast shown");
        self.shown.push((id, toast));
        id
    }

    /// Removes a toast. Dismissing one that is already gone is a no-op.
    pub fn dismiss(&mut self, id: ToastId) {
        self.shown.retain(|(shown, _)| *shown != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ToastId, Toast)> {
        self.shown.iter()
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}
