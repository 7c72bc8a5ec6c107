use async_trait::async_trait;
use ventabot_core::{Embedding, EmbeddingError};

// splitmix64 finalizer, used to expand a text seed into vector components.
fn mix(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Deterministic embedder for tests and offline runs. The same text always
/// maps to the same unit-length vector, so cosine ranking is reproducible
/// without a remote embedding service.
#[derive(Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_to_vec(&self, text: &str) -> Vec<f32> {
        let mut seed = 0u64;
        for byte in text.as_bytes() {
            seed = mix(seed ^ u64::from(*byte));
        }

        let mut vec = Vec::with_capacity(self.dimension);
        for idx in 0..self.dimension {
            let value = mix(seed ^ idx as u64);
            // map into [-1, 1]
            let component = (value as f64 / u64::MAX as f64) * 2.0 - 1.0;
            vec.push(component as f32);
        }

        let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for component in &mut vec {
                *component /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl Embedding for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.hash_to_vec(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.hash_to_vec(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
