use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sunshine_forecast::{
    adjust_outliers, DailyAggregation, Granularity, HourlyFrame, HourlyRecord,
};

fn hourly_records(days: usize) -> Vec<HourlyRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..days * 24)
        .map(|i| {
            let hour = (i % 24) as f64;
            let day = (i / 24) as f64;
            let wave = (day / 58.0).sin();
            HourlyRecord {
                time: start.and_hms_opt(0, 0, 0).unwrap() + Duration::hours(i as i64),
                temp: Some(10.0 + 8.0 * wave + (hour / 4.0).sin()),
                humidity: Some(70.0 - 10.0 * wave),
                dew_point: Some(5.0 + 3.0 * wave),
                cloud_cover: Some(((i * 37) % 100) as f64),
                wind_speed: Some(10.0 + ((i * 13) % 7) as f64),
                precipitation: Some(((i * 17) % 5) as f64 / 10.0),
                shortwave_radiation: Some(if (6.0..18.0).contains(&hour) { 250.0 } else { 0.0 }),
                sunshine_s: Some(if (6.0..18.0).contains(&hour) {
                    1800.0 + 900.0 * wave
                } else {
                    0.0
                }),
            }
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let hourly = HourlyFrame::from_records(&hourly_records(3 * 365)).unwrap();
    let daily = hourly.daily(DailyAggregation::Compact).unwrap();
    let columns = daily.value_columns();
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();

    c.bench_function("daily_aggregation", |b| {
        b.iter(|| black_box(&hourly).daily(DailyAggregation::Full))
    });
    c.bench_function("adjust_outliers_month", |b| {
        b.iter(|| adjust_outliers(black_box(&daily), &columns, Granularity::Month))
    });
    c.bench_function("adjust_outliers_season", |b| {
        b.iter(|| adjust_outliers(black_box(&daily), &columns, Granularity::Season))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
