use std::fmt::Display;

/// Flattens foreign error types into the `Result<T, String>` style used
/// throughout the app, prefixing them with context.
pub trait ErrorStringExt<T> {
    fn err_to_string(self, context: &str) -> Result<T, String>;
}

impl<T, E: Display> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, context: &str) -> Result<T, String> {
        self.map_err(|err| format!("{}: {}", context, err))
    }
}
