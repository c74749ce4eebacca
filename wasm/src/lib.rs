use eqbalance::{
    balance_chemical_equation, BalancerOptions, ChemicalEquation, EquationItem, ExactValue, MatterState, Operator,
    DEFAULT_UNKNOWN_HEADER,
};
use malachite::Rational;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use wasm_bindgen::prelude::*;


/// Molecule as sent by the page
#[derive(Debug, Deserialize)]
struct ItemInput {
    name: String,
    #[serde(default)]
    operator: OperatorInput,
    #[serde(default = "one")]
    coefficient: String,
    atoms: BTreeMap<String, String>,
    #[serde(default)]
    state: StateInput,
    #[serde(default = "one")]
    prefix: String,
}

#[derive(Debug, Default, Deserialize)]
enum OperatorInput {
    #[default]
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StateInput {
    #[default]
    Unspecified,
    Gas,
    Liquid,
    Solid,
    Aqueous,
}

#[derive(Debug, Deserialize)]
struct EquationInput {
    left: Vec<ItemInput>,
    #[serde(default)]
    right: Vec<ItemInput>,
    #[serde(default)]
    options: BalancerOptions,
    #[serde(default)]
    unknown_header: Option<String>,
}

#[derive(Debug, PartialEq, Serialize)]
struct ItemOutput {
    name: String,
    coefficient: String,
}

#[derive(Debug, PartialEq, Serialize)]
struct EquationOutput {
    left: Vec<ItemOutput>,
    right: Vec<ItemOutput>,
}

fn one() -> String {
    String::from("1")
}

/// Parses a rational written as `3`, `-2` or `1/2`
fn parse_value(text: &str) -> Result<ExactValue, String> {
    Rational::from_str(text.trim())
        .map(ExactValue::from)
        .map_err(|_| format!("invalid number \"{}\"", text))
}

impl ItemInput {
    fn into_item(self) -> Result<EquationItem, String> {
        let operator = match self.operator {
            OperatorInput::Plus => Operator::Plus,
            OperatorInput::Minus => Operator::Minus,
        };
        let state = match self.state {
            StateInput::Unspecified => MatterState::Unspecified,
            StateInput::Gas => MatterState::Gas,
            StateInput::Liquid => MatterState::Liquid,
            StateInput::Solid => MatterState::Solid,
            StateInput::Aqueous => MatterState::Aqueous,
        };
        let atoms = self
            .atoms
            .iter()
            .map(|(atom, count)| Ok((atom.as_str(), parse_value(count)?)))
            .collect::<Result<Vec<_>, String>>()?;

        Ok(EquationItem::new(self.name, operator, parse_value(&self.coefficient)?, atoms)
            .with_state(state)
            .with_prefix(parse_value(&self.prefix)?))
    }
}

fn output_side(items: &[EquationItem]) -> Vec<ItemOutput> {
    items
        .iter()
        .map(|item| ItemOutput {
            name: item.name().to_string(),
            coefficient: item.coefficient().simplify().to_string(),
        })
        .collect()
}

fn balance(input: &str) -> Result<EquationOutput, String> {
    let input: EquationInput = serde_json::from_str(input).map_err(|err| format!("invalid input: {}", err))?;

    let left = input.left.into_iter().map(ItemInput::into_item).collect::<Result<Vec<_>, _>>()?;
    let right = input.right.into_iter().map(ItemInput::into_item).collect::<Result<Vec<_>, _>>()?;
    let mut equation = ChemicalEquation::new(left, right);

    let unknown_header = input.unknown_header.as_deref().unwrap_or(DEFAULT_UNKNOWN_HEADER);
    balance_chemical_equation(&mut equation, &input.options, unknown_header).map_err(|err| err.to_string())?;

    Ok(EquationOutput {
        left: output_side(equation.left()),
        right: output_side(equation.right()),
    })
}

// Export a `balance_json` function from Rust to JavaScript.
#[wasm_bindgen]
/// Balance an equation given as JSON and return the coefficients as JSON
pub fn balance_json(input: &str) -> String {
    let output = match balance(input) {
        Ok(output) => output,
        Err(err) => return format!("0{}", err),
    };

    // first char is 1 if success, 0 if error
    match serde_json::to_string(&output) {
        Ok(json) => format!("1{}", json),
        Err(err) => format!("0{}", err),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn success(input: &str) -> Value {
        let output = balance_json(input);
        assert!(output.starts_with('1'), "{}", output);
        serde_json::from_str(&output[1..]).unwrap()
    }

    #[test]
    fn balances_water() {
        let output = success(
            r#"{
                "left": [{"name": "H2", "atoms": {"H": "2"}}, {"name": "O2", "atoms": {"O": "2"}}],
                "right": [{"name": "H2O", "atoms": {"H": "2", "O": "1"}}]
            }"#,
        );

        assert_eq!(output["left"][0]["coefficient"], "2");
        assert_eq!(output["left"][1]["coefficient"], "1");
        assert_eq!(output["right"][0]["name"], "H2O");
        assert_eq!(output["right"][0]["coefficient"], "2");
    }

    #[test]
    fn free_parameters_use_the_given_header() {
        let output = success(
            r#"{
                "left": [{"name": "H2", "atoms": {"H": "2"}}, {"name": "O2", "atoms": {"O": "2"}}],
                "right": [{"name": "H2O", "atoms": {"H": "2", "O": "1"}}, {"name": "H2O2", "atoms": {"H": "2", "O": "2"}}],
                "unknown_header": "U"
            }"#,
        );

        assert_eq!(output["right"][0]["coefficient"], "Ua");
        assert_eq!(output["right"][1]["coefficient"], "Ub");
    }

    #[test]
    fn auto_arranging_with_gas() {
        let output = success(
            r#"{
                "left": [
                    {"name": "H2O", "atoms": {"H": "2", "O": "1"}},
                    {"name": "H2", "atoms": {"H": "2"}, "state": "gas"},
                    {"name": "O2", "atoms": {"O": "2"}, "state": "gas"}
                ]
            }"#,
        );

        assert_eq!(output["left"][0]["name"], "H2O");
        assert_eq!(output["right"][0]["name"], "H2");
        assert_eq!(output["right"][1]["coefficient"], "1");
    }

    #[test]
    fn options_are_passed_through() {
        let output = balance_json(
            r#"{
                "left": [{"name": "H2", "atoms": {"H": "2"}}],
                "right": [{"name": "O2", "atoms": {"O": "2"}}],
                "options": {"error_correction": false}
            }"#,
        );

        assert!(output.starts_with("0a correctable balancing error"));
    }

    #[test]
    fn balancer_error_is_reported() {
        let output = balance_json(r#"{"left": [{"name": "H2", "atoms": {"H": "2"}}], "right": [{"name": "O2", "atoms": {"O": "2"}}]}"#);
        assert_eq!(output, "0all molecules in the chemical equation were eliminated");
    }

    #[test]
    fn invalid_number_is_reported() {
        let output = balance_json(r#"{"left": [{"name": "H2", "atoms": {"H": "two"}}]}"#);
        assert_eq!(output, "0invalid number \"two\"");
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(balance_json("{").starts_with("0invalid input"));
    }
}
