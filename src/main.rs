use std::io::Write as _;

use clap::Parser as _;
use rand::SeedableRng;

mod cli;
mod data;

/// The cost counters reported per sample
#[cfg(feature = "counters")]
static COUNTERS: [(&str, &inplace_timsort::counters::GlobalCounter); 3] = [
    ("Comparisons", &inplace_timsort::counters::COMPARISON_COUNTER),
    ("Merged elements", &inplace_timsort::counters::MERGE_SLICE_COUNTER),
    ("Parked elements", &inplace_timsort::counters::MERGE_SCRATCH_COUNTER),
];

/// Program entry point
fn main() -> std::io::Result<()> {
    let cli::Args {
        data,
        policy,
        container,
        runs,
        size,
        run_length,
        seed,
        output,
    } = cli::Args::parse();

    println!("Running measurements for the in-place timsort with the {policy} policy");
    println!("Runs: {runs}, Slice size: {size}, Data type: {data}, Container: {container}");
    if let Some(run_length) = run_length {
        println!("Data consists of presorted runs of length {run_length}");
    }

    // Create rng
    let mut rng = match seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => {
            println!("No seed provided, generating one using system rng");
            rand::rngs::StdRng::from_os_rng()
        }
    };

    let experiment = Experiment {
        policy: policy.policy(),
        container,
        runs,
        size,
        run_length,
    };

    let samples = match data {
        cli::DataType::UniformU32 => experiment.perform::<u32, data::UniformData<u32>>(&mut rng),
        cli::DataType::UniformU64 => experiment.perform::<u64, data::UniformData<u64>>(&mut rng),
        cli::DataType::NormalF64 => experiment.perform::<f64, data::NormalData>(&mut rng),
        cli::DataType::Strings => experiment.perform::<String, data::StringData>(&mut rng),
        cli::DataType::Points => experiment.perform::<data::Point, data::PointData>(&mut rng),
    };

    report(&samples);

    if let Some(path) = output {
        write_samples(&path, &samples)?;
        println!("Samples written to {}", path.display());
    }

    Ok(())
}

/// The measurements of a single sample
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Time taken by the in-place timsort
    timsort: std::time::Duration,
    /// Time taken by the std library sort
    std: std::time::Duration,
    /// Number of out of order neighbours after the in-place timsort
    timsort_crashes: usize,
    /// Number of out of order neighbours after the std library sort
    std_crashes: usize,
}

/// The configuration of a time sampling experiment
struct Experiment {
    policy: Box<dyn inplace_timsort::MergePolicy>,
    container: cli::ContainerKind,
    runs: usize,
    size: usize,
    run_length: Option<usize>,
}

impl Experiment {
    /// Sample the in-place timsort and the std library sort on the same data
    fn perform<T: data::Element, D: data::Data<T>>(
        &self,
        rng: &mut rand::rngs::StdRng,
    ) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(self.runs);

        let bar = indicatif::ProgressBar::new(self.runs as u64);

        for run in 0..=self.runs {
            let mut values = D::initialize(self.size, rng);
            if let Some(run_length) = self.run_length {
                data::presort_runs(&mut values, run_length);
            }

            let mut timsort_data = data::Container::new(self.container, values.clone());
            let mut std_data = data::Container::new(self.container, values);

            let now = std::time::Instant::now();
            inplace_timsort::sort_by_with_policy(
                std::hint::black_box(timsort_data.as_mut_slice()),
                |a: &T, b: &T| a.is_less(b),
                self.policy.as_ref(),
            );
            let timsort_elapsed = now.elapsed();

            let now = std::time::Instant::now();
            std::hint::black_box(std_data.as_mut_slice()).sort_by(T::compare);
            let std_elapsed = now.elapsed();

            // NOTE: Skip first sample as warm up
            if run == 0 {
                #[cfg(feature = "counters")]
                for (_, counter) in &COUNTERS {
                    counter.take();
                }

                continue;
            }

            samples.push(Sample {
                timsort: timsort_elapsed,
                std: std_elapsed,
                timsort_crashes: data::crash_indices(timsort_data.as_slice()).len(),
                std_crashes: data::crash_indices(std_data.as_slice()).len(),
            });

            bar.inc(1);
        }

        bar.finish();

        samples
    }
}

/// Print statistics of the samples
fn report(samples: &[Sample]) {
    let mut timsort_stats: rolling_stats::Stats<f64> = rolling_stats::Stats::new();
    let mut std_stats: rolling_stats::Stats<f64> = rolling_stats::Stats::new();

    for sample in samples {
        timsort_stats.update(sample.timsort.as_secs_f64() * 1e3);
        std_stats.update(sample.std.as_secs_f64() * 1e3);
    }

    println!("In-place timsort (ms): {timsort_stats:?}");
    println!("Std library sort (ms): {std_stats:?}");

    let failed = samples
        .iter()
        .filter(|sample| sample.timsort_crashes > 0)
        .count();
    if failed == 0 {
        println!("All {} samples were sorted", samples.len());
    } else {
        println!(
            "{failed} of {} samples were not sorted, {} wrong elements in total",
            samples.len(),
            samples
                .iter()
                .map(|sample| sample.timsort_crashes)
                .sum::<usize>()
        );
    }

    #[cfg(feature = "counters")]
    for ((name, _), per_sample) in COUNTERS
        .iter()
        .zip(take_counters_per_sample(samples.len()))
    {
        println!("{name} per sample: {per_sample}");
    }
}

/// Take the cost counters, averaged over `samples` samples
#[cfg(feature = "counters")]
fn take_counters_per_sample(samples: usize) -> [u64; 3] {
    let samples = samples.max(1) as u64;
    COUNTERS.map(|(_, counter)| counter.take() / samples)
}

/// Write the samples as csv to `path`
fn write_samples(path: &std::path::Path, samples: &[Sample]) -> std::io::Result<()> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(writer, "sample,timsort_ns,std_ns,timsort_crashes,std_crashes")?;
    for (index, sample) in samples.iter().enumerate() {
        writeln!(
            writer,
            "{index},{},{},{},{}",
            sample.timsort.as_nanos(),
            sample.std.as_nanos(),
            sample.timsort_crashes,
            sample.std_crashes,
        )?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serializes the tests sorting with the global cost counters
    static COUNTERS_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn lock_counters() -> std::sync::MutexGuard<'static, ()> {
        COUNTERS_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn small_experiment(policy: cli::PolicyKind, run_length: Option<usize>) -> Experiment {
        Experiment {
            policy: policy.policy(),
            container: cli::ContainerKind::Array,
            runs: 3,
            size: 2_000,
            run_length,
        }
    }

    #[test]
    fn experiments_sort_every_data_type() {
        let _counters = lock_counters();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);

        for policy in [cli::PolicyKind::Default, cli::PolicyKind::Inverted] {
            for run_length in [None, Some(50)] {
                let experiment = small_experiment(policy, run_length);

                let samples = [
                    experiment.perform::<u32, data::UniformData<u32>>(&mut rng),
                    experiment.perform::<u64, data::UniformData<u64>>(&mut rng),
                    experiment.perform::<f64, data::NormalData>(&mut rng),
                    experiment.perform::<String, data::StringData>(&mut rng),
                    experiment.perform::<data::Point, data::PointData>(&mut rng),
                ];

                for samples in samples {
                    assert_eq!(samples.len(), 3);
                    assert!(samples.iter().all(|sample| sample.timsort_crashes == 0));
                    assert!(samples.iter().all(|sample| sample.std_crashes == 0));
                }
            }
        }
    }

    #[cfg(feature = "counters")]
    #[test]
    fn counters_exclude_warm_up() {
        let _counters = lock_counters();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);

        for runs in [1, 2, 5] {
            // Fully presorted, every sort is a single run
            let experiment = Experiment {
                runs,
                ..small_experiment(cli::PolicyKind::Default, Some(2_000))
            };

            let samples = experiment.perform::<u32, data::UniformData<u32>>(&mut rng);
            let [comparisons, merged, parked] = take_counters_per_sample(samples.len());

            assert_eq!(samples.len(), runs);
            assert_eq!(comparisons, 1_999, "Comparisons per sample with {runs} runs");
            assert_eq!(merged, 0, "Merged elements per sample with {runs} runs");
            assert_eq!(parked, 0, "Parked elements per sample with {runs} runs");
        }
    }

    #[test]
    fn samples_as_csv() {
        let path = std::env::temp_dir().join("inplace-timsort-samples-test.csv");
        let sample = Sample {
            timsort: std::time::Duration::from_nanos(1500),
            std: std::time::Duration::from_nanos(1200),
            timsort_crashes: 0,
            std_crashes: 0,
        };

        write_samples(&path, &[sample, sample]).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            written,
            "sample,timsort_ns,std_ns,timsort_crashes,std_crashes\n0,1500,1200,0,0\n1,1500,1200,0,0\n"
        );
    }
}
