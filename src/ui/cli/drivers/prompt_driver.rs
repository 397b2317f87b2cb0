use anyhow::Result;

pub trait PromptDriver {
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;
    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;
    /// Picks one of `options`; `default` indexes into it.
    fn ask_choice(
        &self,
        title: &str,
        help: &str,
        options: &[&'static str],
        default: usize,
    ) -> Result<&'static str>;
}
