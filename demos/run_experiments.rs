//! Downloads three years of hourly weather for London and evaluates the two baselines
//! with and without outlier adjustment.

use chrono::NaiveDate;
use sunshine_forecast::{
    download_data, generate_cutoff_date, load_hourly_json, prepare_clean_frame, ArchiveRequest,
    Experiment, ExperimentResults, ExperimentRunner, ForecastError, HyperparameterRecord,
    ModelFactory, ModelFamily, OutlierSetting, PipelineConfig,
};

fn main() -> Result<(), ForecastError> {
    let config = PipelineConfig::builder().build()?;
    config.ensure_dirs()?;

    let request = ArchiveRequest::builder()
        .latitude(51.5072)
        .longitude(-0.1276)
        .start_date(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap())
        .end_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
        .build();
    let file = config.data_dir().join("london.json");
    let file = if file.exists() {
        file
    } else {
        download_data(&request.url(), &config.data_dir(), "london.json")?
    };

    let frames = prepare_clean_frame(&load_hourly_json(&file)?)?;
    for column in &frames.report.columns {
        println!(
            "{}: {} values adjusted ({:.2}%)",
            column.column,
            column.adjusted,
            column.percentage()
        );
    }
    let input = frames.into_split_input(config.target_column());

    let dates = input.with_outliers.dates()?;
    let cutoff = generate_cutoff_date(dates[800], dates[dates.len() - 60], config.seed())?;
    println!("Training cutoff: {cutoff}");

    // Baselines need no tuned hyperparameters.
    let record = HyperparameterRecord::new(config.forecast_horizons().iter().copied());
    let factory = ModelFactory::builder()
        .model_dir(config.model_dir())
        .seed(config.seed())
        .build();
    let runner = ExperimentRunner::builder()
        .input(&input)
        .record(&record)
        .results_dir(config.results_dir())
        .build();

    for family in [ModelFamily::NaiveSeasonal, ModelFamily::ExponentialSmoothing] {
        let mut results = ExperimentResults::new();
        for &horizon in config.forecast_horizons() {
            for outliers in [OutlierSetting::Retained, OutlierSetting::Adjusted] {
                let experiment = Experiment {
                    model: factory.build(family, horizon, &record)?,
                    outliers,
                    cutoff,
                };
                let row = runner.run(&mut results, experiment)?;
                println!(
                    "{:<28} outliers={:<5} rmse={:.3} mae={:.3}",
                    row.model_name_unique, row.outlier_indicator, row.rmse, row.mae
                );
            }
        }
    }

    println!("Results written to {}", config.results_dir().display());
    Ok(())
}
