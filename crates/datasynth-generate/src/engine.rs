use std::time::Instant;

use chrono::{Local, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use datasynth_core::{Entity, Record, Value, ensure_depth};

use crate::errors::GenerationError;
use crate::model::GenerateOptions;
use crate::values::synthesize_value;

/// Produces record sequences for an entity tree.
pub trait DataGenerator {
    fn generate(&mut self, entity: &Entity, count: usize) -> Result<Vec<Record>, GenerationError>;
}

/// Uniform random synthesis over an entity tree.
///
/// The engine owns its random source, so `generate` takes `&mut self`. To
/// generate from several threads give each worker its own engine, for
/// example `SynthesisEngine::seeded(base_seed + worker_index)`.
#[derive(Debug, Clone)]
pub struct SynthesisEngine {
    options: GenerateOptions,
    seed: u64,
    rng: ChaCha8Rng,
}

impl SynthesisEngine {
    pub fn new(options: GenerateOptions) -> Self {
        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            options,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Engine with a fixed seed; equal seeds yield equal record sequences
    /// for the same schema and day.
    pub fn seeded(seed: u64) -> Self {
        Self::new(GenerateOptions {
            seed: Some(seed),
            ..GenerateOptions::default()
        })
    }

    /// Seed actually in use, including one drawn from the OS.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate `count` records for `entity`.
    ///
    /// Arguments and schema depth are checked before any record is built,
    /// so a failure never yields partial output.
    pub fn generate(
        &mut self,
        entity: &Entity,
        count: usize,
    ) -> Result<Vec<Record>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::InvalidArgument(
                "count must be greater than 0".to_string(),
            ));
        }
        ensure_depth(entity, self.options.max_depth)?;

        let start = Instant::now();
        let entity_name = entity.name.as_deref().unwrap_or("<unnamed>");
        info!(
            entity = %entity_name,
            count,
            seed = self.seed,
            "generation started"
        );

        let today = Local::now().date_naive();
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.synthesize_entity(entity, today));
        }

        info!(
            entity = %entity_name,
            records = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );
        Ok(records)
    }

    /// Build one record: attributes in declared order, then one nested record
    /// per child under the child's name. Nameless items are skipped.
    pub fn synthesize_entity(&mut self, entity: &Entity, today: NaiveDate) -> Record {
        let mut record = Record::with_capacity(entity.attributes.len() + entity.children.len());

        for attribute in &entity.attributes {
            if let Some(name) = attribute.name.as_deref() {
                record.insert(name, synthesize_value(attribute, today, &mut self.rng));
            }
        }

        for child in &entity.children {
            let Some(name) = child.name.as_deref() else {
                continue;
            };
            debug!(child = %name, "synthesizing child entity");
            let nested = self.synthesize_entity(child, today);
            record.insert(name, Value::Record(nested));
        }

        record
    }
}

impl Default for SynthesisEngine {
    fn default() -> Self {
        Self::new(GenerateOptions::default())
    }
}

impl DataGenerator for SynthesisEngine {
    fn generate(&mut self, entity: &Entity, count: usize) -> Result<Vec<Record>, GenerationError> {
        SynthesisEngine::generate(self, entity, count)
    }
}
