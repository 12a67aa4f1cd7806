use leptos::prelude::*;

/// A transient feedback message shown in the corner of the admin panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

/// Handle to the toast stack, provided as context by the admin panel.
#[derive(Clone, Copy)]
pub struct Toasts {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, title: &str, message: &str) {
        self.push(title, message, false);
    }

    pub fn error(&self, title: &str, message: &str) {
        self.push(title, message, true);
    }

    pub fn current(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    fn push(&self, title: &str, message: &str, is_error: bool) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: title.to_string(),
                message: message.to_string(),
                is_error,
            })
        });

        // Auto-dismiss after a few seconds. Only meaningful in the browser;
        // server-rendered output never pushes toasts.
        #[cfg(feature = "hydrate")]
        {
            let toasts = self.toasts;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(4_000).await;
                toasts.update(|t| t.retain(|toast| toast.id != id));
            });
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the toast stack. Expects a [`Toasts`] handle in context.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    view! {
        <div class="toast-stack">
            {move || {
                toasts
                    .current()
                    .into_iter()
                    .map(|toast| {
                        view! {
                            <div class="toast" class:toast-error=toast.is_error>
                                <strong class="toast-title">{toast.title}</strong>
                                <span class="toast-body">{toast.message}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_and_assigns_ids() {
        let owner = leptos::prelude::Owner::new();
        owner.set();

        let toasts = Toasts::new();
        toasts.success("Success", "Merchant updated successfully!");
        toasts.error("Error", "Failed to save merchant.");

        let current = toasts.current();
        assert_eq!(current.len(), 2);
        assert_ne!(current[0].id, current[1].id);
        assert!(!current[0].is_error);
        assert!(current[1].is_error);
    }
}
