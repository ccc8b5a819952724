use std::env;
use std::path::PathBuf;

use datasynth_core::{Attribute, Constraints, DataType, Entity};
use datasynth_generate::{DatasetProject, GenerateOptions, SynthesisEngine};
use datasynth_generate::output::CsvWriter;
use tracing_subscriber::EnvFilter;

fn person() -> Entity {
    let address = Entity::new("address")
        .with_attribute(Attribute::new("street", DataType::String))
        .with_attribute(Attribute::new("city", DataType::String))
        .with_attribute(Attribute::new("postalCode", DataType::String));

    Entity::new("Person")
        .with_attribute(Attribute::new("id", DataType::Integer))
        .with_attribute(Attribute::new("name", DataType::String))
        .with_attribute(
            Attribute::new("age", DataType::Integer)
                .with_constraints(Constraints::range(18.0, 80.0)),
        )
        .with_child(address)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut count: usize = 5;
    let mut seed: Option<u64> = None;
    let mut out: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--count" => count = args.next().ok_or("missing --count value")?.parse()?,
            "--seed" => seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            "--out" => out = args.next().map(PathBuf::from),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let out = out.unwrap_or_else(|| env::temp_dir().join("datasynth").join("person.csv"));
    let engine = SynthesisEngine::new(GenerateOptions {
        seed,
        ..GenerateOptions::default()
    });

    let mut project = DatasetProject::with_parts(
        "people",
        Some(Box::new(engine)),
        Some(Box::new(CsvWriter::new())),
    )?;
    let entity = person();
    project.add_entity(entity.clone());

    let records = project.generate(&entity, count)?;
    for record in &records {
        println!("{record}");
    }

    let summary = project.export(&records, &out)?;
    println!(
        "wrote {} records ({} bytes) to {}",
        summary.records,
        summary.bytes_written,
        summary.path.display()
    );
    Ok(())
}
