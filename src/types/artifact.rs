/// A rendered chart image held in memory.
///
/// Artifacts are request-scoped: they are never written to durable
/// storage, so concurrent requests for the same timeframe cannot collide.
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl ChartArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
