use crate::{FeatureVector, Knn, KnnSettings};
use alloc::vec::Vec;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Serialize)]
struct KnnSerialize<'a, L, M> {
    metric: &'a M,
    settings: &'a KnnSettings,
    features: &'a [FeatureVector],
    labels: &'a [L],
}

impl<L, M> Serialize for Knn<L, M>
where
    L: Serialize,
    M: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        KnnSerialize {
            metric: &self.metric,
            settings: &self.settings,
            features: &self.features,
            labels: &self.labels,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Deserialize)]
struct KnnDeserialize<L, M> {
    metric: M,
    #[serde(default)]
    settings: KnnSettings,
    features: Vec<FeatureVector>,
    labels: Vec<L>,
}

/// Deserializing rebuilds the training set through the same checks as construction, so a
/// document with no examples, ragged vectors or unpaired labels is rejected.
impl<'de, L, M> Deserialize<'de> for Knn<L, M>
where
    L: Deserialize<'de>,
    M: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let KnnDeserialize {
            metric,
            settings,
            features,
            labels,
        } = KnnDeserialize::deserialize(deserializer)?;
        Knn::from_parts(metric, settings, features, labels).map_err(de::Error::custom)
    }
}
