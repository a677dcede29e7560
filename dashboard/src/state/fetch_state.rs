//! # Fetch State
//!
//! The `{data, is_loading, error}` triple every data hook exposes to views.

/// Loading indicator, last good payload and last error for one request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    /// Human-readable message for the view; never retried automatically
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A request started: keep the old data on screen, drop the old error
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.is_loading = false;
        self.error = None;
    }

    /// Keep whatever data we had, surface the message
    pub fn fail(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}
