//! Rhai-backed expression evaluator.
//!
//! Creates a Rhai engine with the spreadsheet built-ins registered and the
//! configured resource limits applied, optionally compiling user-defined
//! functions once up front. Formulas reach this evaluator with every cell
//! reference already substituted, so they are plain Rhai expressions.

use log::debug;
use rhai::{AST, Dynamic, Engine, EvalAltResult};

use crate::config::RhaiLimits;
use crate::error::{CoreError, Result};
use gridcalc_engine::{EvaluatorError, ExpressionEvaluator, Value};

/// Create a Rhai engine with built-ins registered and limits applied.
pub fn create_engine(limits: &RhaiLimits) -> Engine {
    let mut engine = Engine::new();
    engine.set_max_operations(limits.max_operations);
    engine.set_max_expr_depths(limits.max_expr_depth, limits.max_function_expr_depth);
    engine.set_max_string_size(limits.max_string_size);
    engine.set_max_array_size(limits.max_array_size);
    crate::builtins::register_builtins(&mut engine);
    engine
}

/// Convert a Rhai result into an engine [`Value`].
pub fn dynamic_to_value(value: &Dynamic) -> Value {
    if value.is_unit() {
        Value::Unit
    } else if let Ok(n) = value.as_int() {
        Value::Int(n)
    } else if let Ok(n) = value.as_float() {
        Value::Float(n)
    } else if let Ok(b) = value.as_bool() {
        Value::Bool(b)
    } else if let Ok(s) = value.clone().into_string() {
        Value::Text(s)
    } else {
        Value::Text(value.to_string())
    }
}

/// Evaluates substituted formulas as Rhai expressions.
pub struct RhaiEvaluator {
    engine: Engine,
    custom_ast: Option<AST>,
}

impl RhaiEvaluator {
    pub fn new() -> RhaiEvaluator {
        RhaiEvaluator::with_limits(&RhaiLimits::default())
    }

    pub fn with_limits(limits: &RhaiLimits) -> RhaiEvaluator {
        RhaiEvaluator {
            engine: create_engine(limits),
            custom_ast: None,
        }
    }

    /// Compile custom functions that every formula may call.
    pub fn with_functions(mut self, script: &str) -> Result<RhaiEvaluator> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| CoreError::RhaiCompile(e.to_string()))?;
        debug!("compiled {} custom functions", ast.iter_functions().count());
        self.custom_ast = Some(ast);
        Ok(self)
    }

    /// Evaluate one expression, merging in custom functions when present.
    pub fn eval(&self, expression: &str) -> std::result::Result<Dynamic, Box<EvalAltResult>> {
        match &self.custom_ast {
            Some(custom) => {
                let formula_ast = self.engine.compile(expression).map_err(|e| {
                    let parse_type = *e.0;
                    let pos = e.1;
                    Box::new(EvalAltResult::ErrorParsing(parse_type, pos))
                })?;
                self.engine.eval_ast(&custom.merge(&formula_ast))
            }
            None => self.engine.eval(expression),
        }
    }
}

impl Default for RhaiEvaluator {
    fn default() -> Self {
        RhaiEvaluator::new()
    }
}

impl ExpressionEvaluator for RhaiEvaluator {
    fn evaluate(&self, expression: &str) -> std::result::Result<Value, EvaluatorError> {
        self.eval(expression)
            .map(|value| dynamic_to_value(&value))
            .map_err(|err| err as EvaluatorError)
    }
}
