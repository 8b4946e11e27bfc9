pub mod compare;
pub mod detailed;
pub mod inspect;
pub mod snapshot;

use clap::Args;
use sheet_parity::SamplingLimits;

/// Bounds of the snapshot sampled from each sheet
#[derive(Args, Debug, Clone)]
pub struct LimitArgs {
    /// Leading columns whose explicit widths are recorded
    #[arg(long, value_name = "N", default_value_t = 19)]
    pub sample_columns: u16,

    /// Leading rows whose explicit heights are recorded
    #[arg(long, value_name = "N", default_value_t = 19)]
    pub sample_rows: u32,

    /// Rows of the top-left style window
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub style_rows: u32,

    /// Columns of the top-left style window
    #[arg(long, value_name = "N", default_value_t = 9)]
    pub style_columns: u16,

    /// Characters kept from each sampled value
    #[arg(long, value_name = "N", default_value_t = 50)]
    pub value_chars: usize,
}

impl LimitArgs {
    pub fn to_limits(&self) -> SamplingLimits {
        SamplingLimits {
            width_columns: self.sample_columns,
            height_rows: self.sample_rows,
            style_rows: self.style_rows,
            style_columns: self.style_columns,
            value_chars: self.value_chars,
            ..SamplingLimits::default()
        }
    }
}
