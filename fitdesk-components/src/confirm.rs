/// Ask the user with the browser's own confirmation dialog
///
/// Answers no if the dialog cannot be shown.
pub fn browser_confirm(question: &str) -> bool {
    leptos::prelude::window()
        .confirm_with_message(question)
        .unwrap_or(false)
}
