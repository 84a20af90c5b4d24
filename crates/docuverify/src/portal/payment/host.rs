use super::ScriptNode;

/// Where a new script element goes inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionTarget {
    Form,
    Container,
}

/// DOM seam for the payment modal. A browser binding implements this over real elements;
/// [`super::ModalDocument`] implements it in memory.
pub trait WidgetHost: Send + 'static {
    /// `None` until the modal content has mounted the container.
    fn injection_target(&self) -> Option<InjectionTarget>;

    fn contains_script(&self, payment_button_id: &str) -> bool;

    fn append_script(&mut self, target: InjectionTarget, script: ScriptNode);

    /// Replaces the container's contents with an empty form shell.
    fn reset_container(&mut self);
}
