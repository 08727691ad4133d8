//! Built-in spreadsheet functions registered on the Rhai engine.
//!
//! Conventions:
//! - Spreadsheet-facing names are ALL CAPS (e.g. `SUM`, `ROUND`).
//! - Numeric functions accept both Rhai integers and floats, so every
//!   type combination is registered explicitly.

use rand::Rng;
use rhai::{Array, Dynamic, Engine, EvalAltResult, Position};

const MAX_DECIMALS: usize = 12;

fn invalid_arg(message: &str) -> Box<EvalAltResult> {
    EvalAltResult::ErrorRuntime(message.into(), Position::NONE).into()
}

fn to_decimal_places(value: i64) -> Result<usize, Box<EvalAltResult>> {
    let places = usize::try_from(value)
        .map_err(|_| invalid_arg(&format!("decimals must be >= 0, got {}", value)))?;
    if places > MAX_DECIMALS {
        return Err(invalid_arg(&format!("decimals must be <= {}", MAX_DECIMALS)));
    }
    Ok(places)
}

fn number(value: &Dynamic) -> Option<f64> {
    value
        .as_float()
        .ok()
        .or_else(|| value.as_int().ok().map(|n| n as f64))
}

fn numbers(arr: &Array) -> Result<Vec<f64>, Box<EvalAltResult>> {
    arr.iter()
        .map(|v| number(v).ok_or_else(|| invalid_arg(&format!("not a number: {}", v))))
        .collect()
}

fn fixed_decimal_string(n: f64, decimals: usize) -> String {
    if n.is_nan() {
        return "#NAN!".to_string();
    }
    if n.is_infinite() {
        return "#INF!".to_string();
    }
    format!("{:.*}", decimals, n)
}

fn money_string(n: f64, symbol: &str, decimals: usize) -> String {
    if n.is_nan() || n.is_infinite() {
        return fixed_decimal_string(n, decimals);
    }
    let sign = if n.is_sign_negative() { "-" } else { "" };
    format!("{}{}{}", sign, symbol, fixed_decimal_string(n.abs(), decimals))
}

fn round_to(n: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (n * scale).round() / scale
}

pub fn register_builtins(engine: &mut Engine) {
    // POW(base, exp)
    engine.register_fn("POW", |base: f64, exp: f64| -> f64 { base.powf(exp) });
    engine.register_fn("POW", |base: f64, exp: i64| -> f64 { base.powf(exp as f64) });
    engine.register_fn("POW", |base: i64, exp: f64| -> f64 { (base as f64).powf(exp) });
    engine.register_fn("POW", |base: i64, exp: i64| -> f64 {
        (base as f64).powf(exp as f64)
    });

    engine.register_fn("SQRT", |x: f64| -> f64 { x.sqrt() });
    engine.register_fn("SQRT", |x: i64| -> f64 { (x as f64).sqrt() });

    engine.register_fn("ABS", |x: f64| -> f64 { x.abs() });
    engine.register_fn("ABS", |x: i64| -> i64 { x.wrapping_abs() });

    // ROUND(x[, decimals])
    engine.register_fn("ROUND", |x: f64| -> f64 { x.round() });
    engine.register_fn("ROUND", |x: i64| -> i64 { x });
    engine.register_fn(
        "ROUND",
        |x: f64, decimals: i64| -> Result<f64, Box<EvalAltResult>> {
            Ok(round_to(x, to_decimal_places(decimals)?))
        },
    );
    engine.register_fn(
        "ROUND",
        |x: i64, decimals: i64| -> Result<i64, Box<EvalAltResult>> {
            to_decimal_places(decimals)?;
            Ok(x)
        },
    );

    engine.register_fn("MIN", |a: i64, b: i64| -> i64 { a.min(b) });
    engine.register_fn("MIN", |a: f64, b: f64| -> f64 { a.min(b) });
    engine.register_fn("MIN", |a: i64, b: f64| -> f64 { (a as f64).min(b) });
    engine.register_fn("MIN", |a: f64, b: i64| -> f64 { a.min(b as f64) });
    engine.register_fn("MAX", |a: i64, b: i64| -> i64 { a.max(b) });
    engine.register_fn("MAX", |a: f64, b: f64| -> f64 { a.max(b) });
    engine.register_fn("MAX", |a: i64, b: f64| -> f64 { (a as f64).max(b) });
    engine.register_fn("MAX", |a: f64, b: i64| -> f64 { a.max(b as f64) });

    // SUM([..]) / AVG([..]) over arrays of numbers
    engine.register_fn("SUM", |arr: Array| -> Result<f64, Box<EvalAltResult>> {
        Ok(numbers(&arr)?.iter().sum())
    });
    engine.register_fn("AVG", |arr: Array| -> Result<f64, Box<EvalAltResult>> {
        let values = numbers(&arr)?;
        if values.is_empty() {
            return Err(invalid_arg("AVG of an empty array"));
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    });

    // IF(cond, then, else)
    engine.register_fn("IF", |cond: bool, then: Dynamic, otherwise: Dynamic| -> Dynamic {
        if cond { then } else { otherwise }
    });

    // FIXED(n, decimals): fixed number of decimal places, trailing zeros kept.
    engine.register_fn(
        "FIXED",
        |n: f64, decimals: i64| -> Result<String, Box<EvalAltResult>> {
            Ok(fixed_decimal_string(n, to_decimal_places(decimals)?))
        },
    );
    engine.register_fn(
        "FIXED",
        |n: i64, decimals: i64| -> Result<String, Box<EvalAltResult>> {
            Ok(fixed_decimal_string(n as f64, to_decimal_places(decimals)?))
        },
    );

    // MONEY(n, symbol[, decimals])
    //   MONEY(15.0424, "£")    -> "£15.04"
    //   MONEY(-2, "$", 0)      -> "-$2"
    engine.register_fn("MONEY", |n: f64, symbol: &str| -> String {
        money_string(n, symbol, 2)
    });
    engine.register_fn("MONEY", |n: i64, symbol: &str| -> String {
        money_string(n as f64, symbol, 2)
    });
    engine.register_fn(
        "MONEY",
        |n: f64, symbol: &str, decimals: i64| -> Result<String, Box<EvalAltResult>> {
            Ok(money_string(n, symbol, to_decimal_places(decimals)?))
        },
    );
    engine.register_fn(
        "MONEY",
        |n: i64, symbol: &str, decimals: i64| -> Result<String, Box<EvalAltResult>> {
            Ok(money_string(n as f64, symbol, to_decimal_places(decimals)?))
        },
    );

    // RAND(): random float in [0.0, 1.0)
    engine.register_fn("RAND", || -> f64 { rand::thread_rng().r#gen() });

    // RANDINT(min, max): random integer in [min, max] inclusive
    engine.register_fn(
        "RANDINT",
        |min: i64, max: i64| -> Result<i64, Box<EvalAltResult>> {
            if min > max {
                return Err(invalid_arg("RANDINT min must be <= max"));
            }
            Ok(rand::thread_rng().gen_range(min..=max))
        },
    );
}
