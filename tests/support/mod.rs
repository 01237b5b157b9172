#![allow(dead_code)]

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::json;

pub fn d(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Write `positions.json`, `details.json` and one stock file under `dir`.
pub fn write_data_dir(dir: &Path) -> Result<()> {
    let positions = json!([
        {"ticker": "SBER", "name": "Сбербанк", "instrument_type": "share"},
        {"ticker": "LKOH", "name": "Лукойл", "instrument_type": "share"},
        {"ticker": "SU26238", "name": "ОФЗ 26238", "instrument_type": "bond"},
        {"ticker": "MOEX", "name": "Мосбиржа", "instrument_type": "share"}
    ]);
    let details = json!([
        {
            "ticker": "SBER", "price": 300, "quantity": 100,
            "change": 1500, "daily_change": -200,
            "dividends": [
                {"date": "2024-07-11", "amount": 33.3, "dividend_yield_percent": 11.1},
                {"date": "2023-07-11T00:00:00Z", "amount": 25}
            ]
        },
        {
            "ticker": "LKOH", "price": 7000, "quantity": 2,
            "change": -300, "daily_change": 40,
            "dividends": [
                {"date": "2024-06-03", "amount": 498},
                {"date": "2024-12-20", "amount": 447}
            ]
        },
        {
            "ticker": "SU26238", "price": 600, "quantity": 10,
            "change": 0, "daily_change": 0
        }
    ]);
    let stock = json!({
        "ticker": "SBER",
        "name": "Сбербанк",
        "sector": {"title": "financial"},
        "country_of_risk": "RU",
        "current_price": 300,
        "quantity": 100,
        "dividends": [
            {"date": "2023-07-11", "amount": 25, "last_buy_date": "2023-07-10"},
            {"date": "2024-07-11", "amount": 33.3, "dividend_yield_percent": 11.1},
            {"date": "2022-05-12", "amount": 0}
        ]
    });

    std::fs::write(dir.join("positions.json"), serde_json::to_string_pretty(&positions)?)?;
    std::fs::write(dir.join("details.json"), serde_json::to_string_pretty(&details)?)?;
    std::fs::create_dir_all(dir.join("stocks"))?;
    std::fs::write(dir.join("stocks").join("SBER.json"), serde_json::to_string_pretty(&stock)?)?;
    Ok(())
}
