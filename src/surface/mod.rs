pub mod mock;
pub mod terminal;

/// The display surfaces the pipeline writes to. They already exist and
/// are owned by the host; the pipeline never creates or styles them.
pub trait Surface: Send + Sync {
    /// File-name display.
    fn show_file_name(&self, name: &str);
    /// Add one line to the log display.
    fn append_log(&self, line: &str);
    /// Empty the log display.
    fn clear_log(&self);
    /// Overwrite the result display.
    fn show_result(&self, text: &str);
}
