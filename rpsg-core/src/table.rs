//! Two-column tabulated values encoded as `y@x,y@x,...`.

use crate::errors::{RPSGError, RPSGResult};
use crate::format::FloatFormat;
use crate::units::Unit;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// An `(x, y)` series with optional units on either axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    x: Array1<f64>,
    y: Array1<f64>,
    x_unit: Option<Unit>,
    y_unit: Option<Unit>,
}

impl Table {
    /// Creates a unitless table.
    pub fn new(x: impl Into<Array1<f64>>, y: impl Into<Array1<f64>>) -> RPSGResult<Self> {
        Self::with_units(x, None, y, None)
    }

    pub fn with_units(
        x: impl Into<Array1<f64>>,
        x_unit: Option<Unit>,
        y: impl Into<Array1<f64>>,
        y_unit: Option<Unit>,
    ) -> RPSGResult<Self> {
        let (x, y) = (x.into(), y.into());
        if x.len() != y.len() {
            return Err(RPSGError::value_error(
                "table",
                format!("x has {} entries but y has {}", x.len(), y.len()),
            ));
        }
        Ok(Self {
            x,
            y,
            x_unit,
            y_unit,
        })
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn x_unit(&self) -> Option<&Unit> {
        self.x_unit.as_ref()
    }

    pub fn y_unit(&self) -> Option<&Unit> {
        self.y_unit.as_ref()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Renders the table as `y@x,...`.
    ///
    /// An axis that carries a unit must be given a target unit to be written
    /// in. An axis without a unit ignores the target.
    ///
    /// ```
    /// use rpsg_core::format::FloatFormat;
    /// use rpsg_core::table::Table;
    ///
    /// let t = Table::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).unwrap();
    /// let text = t.render(FloatFormat::Fixed(1), None, None).unwrap();
    /// assert_eq!(text, "4.0@1.0,5.0@2.0,6.0@3.0");
    /// ```
    pub fn render(
        &self,
        fmt: FloatFormat,
        x_unit: Option<&Unit>,
        y_unit: Option<&Unit>,
    ) -> RPSGResult<String> {
        let x = axis_in(&self.x, self.x_unit.as_ref(), x_unit, "x")?;
        let y = axis_in(&self.y, self.y_unit.as_ref(), y_unit, "y")?;
        Ok(y.iter()
            .zip(x.iter())
            .map(|(y, x)| format!("{}@{}", fmt.apply(*y), fmt.apply(*x)))
            .collect::<Vec<_>>()
            .join(","))
    }

    /// Parses `y@x,...` into a unitless table.
    pub fn parse(text: &str) -> RPSGResult<Self> {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for pair in text.trim().split(',') {
            let (yv, xv) = pair
                .split_once('@')
                .ok_or_else(|| RPSGError::value_error("table", format!("missing '@' in {pair:?}")))?;
            y.push(parse_float(yv)?);
            x.push(parse_float(xv)?);
        }
        Self::new(x, y)
    }

    /// True if `text` looks like a table rather than a scalar.
    pub fn is_table_text(text: &str) -> bool {
        text.contains('@')
    }

    /// Returns a copy with the given units attached.
    pub fn assume_units(&self, x_unit: Option<Unit>, y_unit: Option<Unit>) -> Self {
        Self {
            x_unit,
            y_unit,
            ..self.clone()
        }
    }
}

fn axis_in(
    values: &Array1<f64>,
    own: Option<&Unit>,
    target: Option<&Unit>,
    axis: &str,
) -> RPSGResult<Array1<f64>> {
    match (own, target) {
        (None, _) => Ok(values.clone()),
        (Some(own), Some(target)) => {
            let factor = own.conversion_factor(target)?;
            Ok(values * factor)
        }
        (Some(own), None) => Err(RPSGError::type_error(
            "table",
            format!("a target unit for the {axis} axis"),
            format!("values in {own}"),
        )),
    }
}

fn parse_float(text: &str) -> RPSGResult<f64> {
    text.trim()
        .parse()
        .map_err(|_| RPSGError::value_error("table", format!("{text:?} is not a number")))
}
