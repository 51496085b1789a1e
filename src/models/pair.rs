/// A single mapper emission as seen on the reducer's input: one
/// `key<TAB>value` line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmittedPair<'a> {
    pub key: &'a str,
    pub value: f64,
}

impl<'a> EmittedPair<'a> {
    /// Parse one pair line, splitting on the first tab. Returns `None`
    /// for anything that is not a tab-separated pair with a finite
    /// numeric value; the caller skips such lines without touching its
    /// group state.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (key, value_str) = line.split_once('\t')?;
        let value = value_str.trim().parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self { key, value })
    }
}
