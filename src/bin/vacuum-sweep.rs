use decisim::chart;
use decisim::envs::{EnvBuilder, VacuumAction, VacuumConfig};
use decisim::experiments::{run_vacuum_sweep, VacuumPolicy, VacuumSweepConfig};
use decisim::logging::CLILogger;
use decisim::simulation::{run_episode, StepLogger, StepTrace};
use decisim::spaces::IndexedTypeSpace;
use std::io;
use std::time::Duration;

fn main() {
    // One traced episode per policy.
    let demo_config = VacuumConfig {
        dirt_spawn_prob: 0.1,
        ..VacuumConfig::default()
    };
    let mut logger = CLILogger::new(Duration::from_secs(1));
    for (i, policy) in VacuumPolicy::ALL.into_iter().enumerate() {
        println!("=== Running {} ===", policy);
        let mut env = demo_config.build_env(i as u64).unwrap();
        let mut agent = policy.build(100 + i as u64);
        let mut hooks = (
            StepTrace::stdout(),
            StepLogger::new(IndexedTypeSpace::<VacuumAction>::new(), &mut logger),
        );
        run_episode(&mut env, &mut agent, &mut hooks).unwrap();
    }
    drop(logger);

    // Mean reward against dirt spawn probability.
    let sweep = VacuumSweepConfig::default();
    let result = run_vacuum_sweep(&sweep, 0).unwrap();
    if let Err(err) = chart::render_line_chart(
        &mut io::stdout(),
        "Vacuum World: mean reward vs dirt spawn probability",
        "dirt spawn probability",
        &result.dirt_probs,
        &result.series,
    ) {
        // The computed results stay usable without the chart.
        eprintln!("chart rendering failed: {}", err);
        for series in &result.series {
            println!("{}: {:?}", series.name, series.values);
        }
    }
}
