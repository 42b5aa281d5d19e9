use std::path::Path;

/// Hands a written submission script to whatever runs it.
///
/// Submission is fire-and-forget: an `Err` is reported by the caller and the
/// sweep carries on.
pub trait JobSubmitter {
    fn submit(&self, script_path: &Path) -> Result<(), String>;
}

impl<F> JobSubmitter for F
where
    F: Fn(&Path) -> Result<(), String>,
{
    fn submit(&self, script_path: &Path) -> Result<(), String> {
        self(script_path)
    }
}
