//! ObservationScope for begin/complete logging around an operation
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` on `complete()`
//! - Logs `{name}_ERROR` on drop if never completed

use super::logger::Logger;

/// Logs the lifecycle of one operation
///
/// ```ignore
/// let scope = ObservationScope::new("TABLE_UPLOAD", &[("table", "t.csv")]);
/// store.write(...)?; // early return logs TABLE_UPLOAD_ERROR
/// scope.complete();
/// ```
pub struct ObservationScope {
    name: &'static str,
    fields: Vec<(&'static str, String)>,
    completed: bool,
}

impl ObservationScope {
    pub fn new(name: &'static str, fields: &[(&'static str, &str)]) -> Self {
        let scope = Self {
            name,
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            completed: false,
        };
        Logger::info(&format!("{}_BEGIN", name), &scope.field_refs());
        scope
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    /// Mark the operation as done
    pub fn complete(mut self) {
        self.completed = true;
        Logger::info(&format!("{}_COMPLETE", self.name), &self.field_refs());
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.completed {
            Logger::error(&format!("{}_ERROR", self.name), &self.field_refs());
        }
    }
}
