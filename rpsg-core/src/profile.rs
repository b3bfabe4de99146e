//! Per-layer atmospheric profiles.
//!
//! A [`Profile`] is a named column of values, one per atmospheric layer. A
//! [`ProfileSet`] bundles exactly one pressure and one temperature profile
//! with any number of concentration profiles, and is what the layered
//! `ATMOSPHERE-LAYER-<n>` block is written from.

use crate::errors::{RPSGError, RPSGResult};
use crate::format::FloatFormat;
use crate::units::{Quantity, Unit};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// What a profile measures, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileRole {
    Pressure,
    Temperature,
    /// A named molecule or aerosol concentration.
    Concentration,
}

impl ProfileRole {
    pub fn from_name(name: &str) -> Self {
        match name {
            "T" | "Temp" => Self::Temperature,
            "P" | "Press" => Self::Pressure,
            _ => Self::Concentration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    data: Array1<f64>,
    unit: Unit,
}

impl Profile {
    /// Creates a dimensionless profile.
    pub fn new(name: impl Into<String>, data: impl Into<Array1<f64>>) -> Self {
        Self::with_unit(name, data, Unit::dimensionless())
    }

    pub fn with_unit(name: impl Into<String>, data: impl Into<Array1<f64>>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            unit,
        }
    }

    pub fn role(&self) -> ProfileRole {
        ProfileRole::from_name(&self.name)
    }

    pub fn is_temperature(&self) -> bool {
        self.role() == ProfileRole::Temperature
    }

    pub fn is_pressure(&self) -> bool {
        self.role() == ProfileRole::Pressure
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn data(&self) -> &Array1<f64> {
        &self.data
    }

    pub fn nlayers(&self) -> usize {
        self.data.len()
    }

    pub fn get_layer(&self, i: usize) -> Option<Quantity> {
        self.fget_layer(i).map(|v| Quantity::new(v, self.unit.clone()))
    }

    /// The raw value of layer `i`, in the profile's own unit.
    pub fn fget_layer(&self, i: usize) -> Option<f64> {
        self.data.get(i).copied()
    }

    /// The profile's data expressed in `unit`.
    ///
    /// A dimensionless pressure or temperature profile is taken to already be
    /// in the requested unit.
    fn data_in(&self, unit: &Unit) -> RPSGResult<Array1<f64>> {
        if self.unit.is_dimensionless() && !unit.is_dimensionless() {
            return Ok(self.data.clone());
        }
        let factor = self.unit.conversion_factor(unit)?;
        Ok(&self.data * factor)
    }
}

/// A validated set of profiles for a layered atmosphere.
///
/// Rows of `layers` are `(pressure [bar], temperature [K], concentrations...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    molecules: Vec<String>,
    layers: Array2<f64>,
}

impl ProfileSet {
    pub fn pressure_unit() -> Unit {
        Unit::from_symbol("bar")
    }

    pub fn temperature_unit() -> Unit {
        Unit::from_symbol("K")
    }

    /// Validates and bundles profiles.
    ///
    /// ```
    /// use rpsg_core::profile::{Profile, ProfileSet};
    /// use rpsg_core::units::Unit;
    ///
    /// let set = ProfileSet::new(vec![
    ///     Profile::with_unit("Press", vec![1.0, 0.1], Unit::from_symbol("bar")),
    ///     Profile::with_unit("Temp", vec![300.0, 250.0], Unit::from_symbol("K")),
    ///     Profile::new("H2O", vec![1e-2, 1e-3]),
    /// ])
    /// .unwrap();
    /// assert_eq!(set.nlayers(), 2);
    /// assert_eq!(set.names(), vec!["H2O".to_string()]);
    /// ```
    pub fn new(profiles: Vec<Profile>) -> RPSGResult<Self> {
        let pressure = single_role(&profiles, ProfileRole::Pressure)?;
        let temperature = single_role(&profiles, ProfileRole::Temperature)?;
        let nlayers = pressure.nlayers();
        if let Some(bad) = profiles.iter().find(|p| p.nlayers() != nlayers) {
            return Err(RPSGError::MalformedRecord(format!(
                "profile {} has {} layers, expected {nlayers}",
                bad.name,
                bad.nlayers()
            )));
        }

        let concentrations: Vec<&Profile> = profiles
            .iter()
            .filter(|p| p.role() == ProfileRole::Concentration)
            .collect();
        let mut layers = Array2::zeros((nlayers, concentrations.len() + 2));
        layers
            .column_mut(0)
            .assign(&pressure.data_in(&Self::pressure_unit())?);
        layers
            .column_mut(1)
            .assign(&temperature.data_in(&Self::temperature_unit())?);
        for (i, profile) in concentrations.iter().enumerate() {
            layers
                .column_mut(i + 2)
                .assign(&profile.data_in(&Unit::dimensionless())?);
        }

        Ok(Self {
            molecules: concentrations.iter().map(|p| p.name.clone()).collect(),
            layers,
        })
    }

    /// Builds a set from rows already in `(bar, K, concentrations...)` form.
    pub fn from_layers(molecules: Vec<String>, rows: Vec<Vec<f64>>) -> RPSGResult<Self> {
        let width = molecules.len() + 2;
        let mut layers = Array2::zeros((rows.len(), width));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RPSGError::MalformedRecord(format!(
                    "layer {} has {} values, expected {width}",
                    i + 1,
                    row.len()
                )));
            }
            layers.row_mut(i).assign(&Array1::from(row.clone()));
        }
        Ok(Self { molecules, layers })
    }

    pub fn nlayers(&self) -> usize {
        self.layers.len_of(Axis(0))
    }

    /// Names of the concentration columns, in input order.
    pub fn names(&self) -> Vec<String> {
        self.molecules.clone()
    }

    /// Pressure of layer `i`, in bar.
    pub fn get_pressure(&self, i: usize) -> Option<f64> {
        self.layers.get((i, 0)).copied()
    }

    /// Temperature of layer `i`, in K.
    pub fn get_temperature(&self, i: usize) -> Option<f64> {
        self.layers.get((i, 1)).copied()
    }

    /// Concentrations of layer `i`, in the order of [`ProfileSet::names`].
    pub fn get_molecules(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.nlayers() {
            return None;
        }
        Some(self.layers.row(i).iter().skip(2).copied().collect())
    }

    /// The profiles this set was built from, in normalized units.
    pub fn profiles(&self) -> Vec<Profile> {
        let mut out = vec![
            Profile::with_unit(
                "Press",
                self.layers.column(0).to_owned(),
                Self::pressure_unit(),
            ),
            Profile::with_unit(
                "Temp",
                self.layers.column(1).to_owned(),
                Self::temperature_unit(),
            ),
        ];
        for (i, name) in self.molecules.iter().enumerate() {
            out.push(Profile::new(name.clone(), self.layers.column(i + 2).to_owned()));
        }
        out
    }

    /// Layer `i` as a comma-joined row.
    pub fn render_layer(&self, i: usize, fmt: FloatFormat) -> Option<String> {
        if i >= self.nlayers() {
            return None;
        }
        Some(
            self.layers
                .row(i)
                .iter()
                .map(|v| fmt.apply(*v))
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

fn single_role(profiles: &[Profile], role: ProfileRole) -> RPSGResult<&Profile> {
    let mut matching = profiles.iter().filter(|p| p.role() == role);
    match (matching.next(), matching.next()) {
        (Some(p), None) => Ok(p),
        (None, _) => Err(RPSGError::MalformedRecord(format!(
            "no {role:?} profile given"
        ))),
        (Some(_), Some(_)) => Err(RPSGError::MalformedRecord(format!(
            "more than one {role:?} profile given"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn press() -> Profile {
        Profile::with_unit("Press", array![1.0, 0.1, 0.01], Unit::from_symbol("bar"))
    }

    fn temp() -> Profile {
        Profile::with_unit("Temp", array![300.0, 250.0, 200.0], Unit::from_symbol("K"))
    }

    #[test]
    fn test_profile_roles() {
        let p = Profile::new("H2O", array![1.0, 1.0]);
        assert_eq!(p.nlayers(), 2);
        assert_eq!(p.fget_layer(0), Some(1.0));
        assert!(!(p.is_temperature() || p.is_pressure()));

        let t = Profile::with_unit("T", array![300.0, 200.0], Unit::from_symbol("K"));
        assert!(t.is_temperature());
        assert_eq!(t.get_layer(1), Some(Quantity::of(200.0, "K")));

        let p = Profile::with_unit("Press", array![1.0, 0.1], Unit::from_symbol("bar"));
        assert!(p.is_pressure());
        assert_eq!(p.get_layer(0), Some(Quantity::of(1.0, "bar")));
        assert_eq!(p.get_layer(5), None);
    }

    #[test]
    fn test_set_accessors() {
        let h2o = Profile::new("H2O", array![1.0, 0.7, 1.0]);
        let set = ProfileSet::new(vec![press(), temp(), h2o]).unwrap();
        assert_eq!(set.get_molecules(0), Some(vec![1.0]));
        assert_eq!(set.get_temperature(0), Some(300.0));
        assert_eq!(set.get_temperature(2), Some(200.0));
        assert_eq!(set.get_pressure(1), Some(0.1));
        assert_eq!(set.nlayers(), 3);
        assert_eq!(
            set.render_layer(0, FloatFormat::Scientific(6)).unwrap(),
            "1.000000e+00,3.000000e+02,1.000000e+00"
        );
    }

    #[test]
    fn test_mismatched_lengths() {
        let h2o = Profile::new("H2O", array![1.0, 0.7, 1.0]);
        let co2 = Profile::new("CO2", array![0.0, 0.3]);
        let err = ProfileSet::new(vec![press(), temp(), h2o, co2]).unwrap_err();
        assert!(matches!(err, RPSGError::MalformedRecord(_)));
    }

    #[test]
    fn test_missing_roles() {
        let h2o = Profile::new("H2O", array![1.0, 0.7, 1.0]);
        assert!(ProfileSet::new(vec![press(), h2o.clone()]).is_err());
        assert!(ProfileSet::new(vec![temp(), h2o]).is_err());
        assert!(ProfileSet::new(vec![press(), press(), temp()]).is_err());
    }

    #[test]
    fn test_pressure_converted_to_bar() {
        let pa = Profile::with_unit("P", array![1e5, 1e4], Unit::from_symbol("Pa"));
        let t = Profile::with_unit("T", array![280.0, 270.0], Unit::from_symbol("K"));
        let set = ProfileSet::new(vec![t, pa]).unwrap();
        assert!((set.get_pressure(0).unwrap() - 1.0).abs() < 1e-12);
        assert!((set.get_pressure(1).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_temperature_unit() {
        let t = Profile::with_unit("T", array![280.0], Unit::from_symbol("s"));
        let p = Profile::with_unit("P", array![1.0], Unit::from_symbol("bar"));
        assert!(matches!(
            ProfileSet::new(vec![p, t]),
            Err(RPSGError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_from_layers_checks_width() {
        let ok = ProfileSet::from_layers(vec!["H2O".into()], vec![vec![1.0, 300.0, 0.5]]).unwrap();
        assert_eq!(ok.get_molecules(0), Some(vec![0.5]));
        assert!(ProfileSet::from_layers(vec!["H2O".into()], vec![vec![1.0, 300.0]]).is_err());
    }

    #[test]
    fn test_profiles_round_trip() {
        let h2o = Profile::new("H2O", array![1.0, 0.7, 1.0]);
        let set = ProfileSet::new(vec![press(), temp(), h2o]).unwrap();
        let again = ProfileSet::new(set.profiles()).unwrap();
        assert_eq!(set, again);
    }
}
