use crate::fixtures::generate_population;
use axum::body::Bytes;
use prost::Message;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wirebench::{entity, proto};

/// The population served by every endpoint, encoded once up front.
///
/// Built before the servers start and only ever shared behind an `Arc`; nothing mutates it.
#[derive(Debug)]
pub struct Dataset {
    population: proto::GetPopulationResponse,
    json: Bytes,
    raw: Vec<u8>,
}

impl Dataset {
    pub fn new(population: &entity::GetPopulationResponse) -> Result<Self, serde_json::Error> {
        let json = Bytes::from(serde_json::to_vec(population)?);
        let population = proto::GetPopulationResponse::from(population);
        let raw = population.encode_to_vec();
        Ok(Self {
            population,
            json,
            raw,
        })
    }

    /// Generates `size` people. The same `seed` always yields the same dataset.
    pub fn generate(size: usize, seed: Option<u64>) -> anyhow::Result<Self> {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let population = generate_population(size, &mut rng)?;
        Ok(Self::new(&population)?)
    }

    pub fn len(&self) -> usize {
        self.population.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.population.is_empty()
    }

    /// Body of the REST endpoint.
    pub fn json(&self) -> Bytes {
        self.json.clone()
    }

    pub fn proto(&self) -> &proto::GetPopulationResponse {
        &self.population
    }

    /// Serialized [`proto::GetPopulationResponse`], as sent by `GetPopulationRaw`.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_describe_the_same_people() {
        let dataset = Dataset::generate(25, Some(5)).unwrap();
        assert_eq!(dataset.len(), 25);

        let json: entity::GetPopulationResponse = serde_json::from_slice(&dataset.json()).unwrap();
        let raw = proto::GetPopulationResponse::decode(dataset.raw()).unwrap();

        assert_eq!(json.population.len(), 25);
        assert_eq!(&raw, dataset.proto());
        assert_eq!(proto::GetPopulationResponse::from(&json), raw);
        assert!(dataset.raw().len() < dataset.json().len());
    }
}
