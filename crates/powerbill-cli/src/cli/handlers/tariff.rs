use crate::error::Result;
use crate::output::{
    json_output,
    table_output::{display_breakdown, display_tariff},
};
use powerbill_billing::domain::TariffBreakdown;
use powerbill_billing::BillingConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TariffQuote {
    units: i64,
    #[serde(flatten)]
    breakdown: TariffBreakdown,
}

pub fn handle_tariff(config: &BillingConfig, units: Option<i64>, json: bool) -> Result<()> {
    let tariff = config.build_tariff()?;
    let currency = config.display.currency_symbol.as_str();

    match units {
        None if json => json_output(&tariff),
        None => {
            display_tariff(&tariff, currency);
            Ok(())
        }
        Some(units) => {
            let breakdown = tariff.breakdown(units);
            if json {
                return json_output(&TariffQuote { units, breakdown });
            }
            display_tariff(&tariff, currency);
            display_breakdown(units, &breakdown, currency);
            Ok(())
        }
    }
}
