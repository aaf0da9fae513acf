/// Transforms a raw image reference into a renderable URL.
///
/// Applied at render time only; the engine never stores the normalised
/// form.
pub trait ImageNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

impl<F> ImageNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, raw: &str) -> String {
        self(raw)
    }
}
