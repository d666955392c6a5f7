use decisim::belief::posterior;
use decisim::chart;
use decisim::envs::{DiagnosisConfig, EnvBuilder};
use decisim::experiments::{run_diagnosis_comparison, DiagnosisCompareConfig, DiagnosisPolicy};
use decisim::simulation::{run_episode, StepTrace};
use std::io;

fn main() {
    // One traced episode per policy.
    let config = DiagnosisConfig::default();
    for (i, policy) in DiagnosisPolicy::ALL.into_iter().enumerate() {
        println!("=== Running {} ===", policy);
        let mut env = config.build_env(i as u64).unwrap();
        let mut agent = policy.build(&config, 2, 100 + i as u64);
        let total = run_episode(&mut env, &mut agent, &mut StepTrace::stdout()).unwrap();
        println!(
            "true disease: {}  final posterior: {:?}  total: {}",
            env.true_disease(),
            posterior(&config, env.tests_done()),
            total,
        );
    }

    // Score distributions across policies.
    let compare = DiagnosisCompareConfig::default();
    let distributions = run_diagnosis_comparison(&compare, 0).unwrap();
    if let Err(err) = chart::render_histogram(
        &mut io::stdout(),
        "Diagnosis agents: total reward distribution",
        &distributions,
        15,
    ) {
        // The computed results stay usable without the chart.
        eprintln!("chart rendering failed: {}", err);
        for series in &distributions {
            println!("{}: {:?}", series.name, series.values);
        }
    }
}
