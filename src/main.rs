use std::sync::Arc;
use std::thread;

use tracing::{
    error,
    info
};
use tracing_subscriber::EnvFilter;

use tabfun::concurrent::multiplyingtask::MultiplyingTask;
use tabfun::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use tabfun::configuration::EngineConfiguration;
use tabfun::functions::factory::tabulatedfunctionfactory::TabulatedFunctionFactory;
use tabfun::functions::mathfunction::MathFunction;
use tabfun::functions::simplefunctions::SqrFunction;
use tabfun::operations::differentialoperator::DifferentialOperator;
use tabfun::operations::steppingdifferentialoperator::DifferenceScheme;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 可選參數：設定檔路徑，未提供時使用預設值
    let config = match std::env::args().nth(1) {
        Some(config_path) => match EngineConfiguration::from_reader(&config_path) {
            Ok(config) => config,
            Err(err) => {
                error!("{}", err);
                std::process::exit(1);
            }
        },
        None => EngineConfiguration::new(),
    };

    let function = config
        .factory()
        .create_from_function(&SqrFunction, 0.0, 10.0, config.sample_count())
        .unwrap();
    info!(factory = ?config.factory(), count = config.sample_count(), "sampled x^2 over [0, 10]");

    let shared = Arc::new(SynchronizedTabulatedFunction::new(function));
    let handles: Vec<_> = (0..config.worker_threads())
        .map(|_| {
            let task = MultiplyingTask::new(Arc::clone(&shared));
            thread::spawn(move || task.run())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let derivative = config
        .differential_operator()
        .derive_synchronously(&shared)
        .unwrap();
    let stepped = config
        .stepping_operator(DifferenceScheme::Middle)
        .unwrap()
        .derive(Arc::clone(&shared));

    let scale = 2f64.powi(config.worker_threads() as i32);
    for x in [0.0, 2.5, 5.0, 7.5, 10.0] {
        println!("{}, {}, {}, {}",
                 x,
                 shared.apply(x) / scale,
                 derivative.apply(x) / scale,
                 stepped.apply(x) / scale);
    }
}
