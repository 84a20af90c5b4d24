use super::host::{InjectionTarget, WidgetHost};
use super::ScriptNode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct WidgetContainer {
    form: Option<Vec<ScriptNode>>,
    children: Vec<ScriptNode>,
}

impl WidgetContainer {
    fn shell() -> Self {
        Self {
            form: Some(Vec::new()),
            children: Vec::new(),
        }
    }

    fn scripts(&self) -> impl Iterator<Item = &ScriptNode> {
        self.form.iter().flatten().chain(self.children.iter())
    }
}

/// In-memory model of the payment modal's DOM. The container is absent until the modal
/// content mounts, mirroring the latency a browser shows between opening and rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalDocument {
    container: Option<WidgetContainer>,
}

impl ModalDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts the container with an empty form. Existing content is left alone.
    pub fn mount(&mut self) {
        if self.container.is_none() {
            self.container = Some(WidgetContainer::shell());
        }
    }

    /// Mounts a container that has no form element yet.
    pub fn mount_without_form(&mut self) {
        if self.container.is_none() {
            self.container = Some(WidgetContainer::default());
        }
    }

    pub fn unmount(&mut self) {
        self.container = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    pub fn script_count(&self, payment_button_id: &str) -> usize {
        self.container
            .as_ref()
            .map(|container| {
                container
                    .scripts()
                    .filter(|script| script.payment_button_id == payment_button_id)
                    .count()
            })
            .unwrap_or(0)
    }

    /// HTML for the container, or `None` while it is not mounted.
    pub fn markup(&self) -> Option<String> {
        let container = self.container.as_ref()?;
        let mut html = String::from(r#"<div id="razorpay-container">"#);
        if let Some(form) = &container.form {
            html.push_str("<form>");
            for script in form {
                html.push_str(&script.markup());
            }
            html.push_str("</form>");
        }
        for script in &container.children {
            html.push_str(&script.markup());
        }
        html.push_str("</div>");
        Some(html)
    }
}

impl WidgetHost for ModalDocument {
    fn injection_target(&self) -> Option<InjectionTarget> {
        self.container.as_ref().map(|container| {
            if container.form.is_some() {
                InjectionTarget::Form
            } else {
                InjectionTarget::Container
            }
        })
    }

    fn contains_script(&self, payment_button_id: &str) -> bool {
        self.script_count(payment_button_id) > 0
    }

    fn append_script(&mut self, target: InjectionTarget, script: ScriptNode) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        match (target, container.form.as_mut()) {
            (InjectionTarget::Form, Some(form)) => form.push(script),
            _ => container.children.push(script),
        }
    }

    fn reset_container(&mut self) {
        if let Some(container) = self.container.as_mut() {
            *container = WidgetContainer::shell();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::payment::PaymentWidgetConfig;

    #[test]
    fn container_is_absent_until_mounted() {
        let mut document = ModalDocument::new();
        assert_eq!(document.injection_target(), None);
        assert_eq!(document.markup(), None);

        document.mount();
        assert_eq!(document.injection_target(), Some(InjectionTarget::Form));
        assert_eq!(
            document.markup().as_deref(),
            Some(r#"<div id="razorpay-container"><form></form></div>"#)
        );
    }

    #[test]
    fn reset_restores_an_empty_form_shell() {
        let config = PaymentWidgetConfig::default();
        let mut document = ModalDocument::new();
        document.mount_without_form();
        assert_eq!(document.injection_target(), Some(InjectionTarget::Container));

        document.append_script(
            InjectionTarget::Container,
            ScriptNode::payment_button(&config),
        );
        assert!(document.contains_script(&config.payment_button_id));

        document.reset_container();
        assert_eq!(document.script_count(&config.payment_button_id), 0);
        assert_eq!(document.injection_target(), Some(InjectionTarget::Form));
    }
}
