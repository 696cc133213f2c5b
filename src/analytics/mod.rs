pub mod lookback_analytic;
