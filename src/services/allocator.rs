//! Percentage allocator
//!
//! Validates proposed module splits and computes each module's starting
//! balance from the plan total. All arithmetic is exact decimal; balances
//! are only rounded when displayed.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{MoneyplanError, MoneyplanResult};
use crate::models::{default_color, is_valid_color, Module, ModuleKind, Money, Percent};

/// Maximum number of modules in one plan
pub const MAX_MODULES: usize = 8;

/// A proposed module split, parsed from CLI input or collected by the wizard
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSpec {
    pub name: String,
    pub percentage: Percent,
    pub kind: ModuleKind,
    pub color: Option<String>,
}

impl ModuleSpec {
    /// Create a spec with the default kind (expense) and no explicit color
    pub fn new(name: impl Into<String>, percentage: Percent) -> Self {
        Self {
            name: name.into(),
            percentage,
            kind: ModuleKind::Expense,
            color: None,
        }
    }

    /// Set the module kind
    pub fn with_kind(mut self, kind: ModuleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set an explicit color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl FromStr for ModuleSpec {
    type Err = MoneyplanError;

    /// Parse `NAME:PERCENT[:TYPE[:COLOR]]`, e.g. `Food:60` or `Rainy Day:20:saving:#B6FFD9`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(MoneyplanError::Validation(format!(
                "Invalid module spec '{}': expected NAME:PERCENT[:TYPE[:COLOR]]",
                s
            )));
        }

        let name = parts[0].trim();
        if name.is_empty() {
            return Err(MoneyplanError::Validation(
                "Module name cannot be empty".into(),
            ));
        }

        let percentage = Percent::parse(parts[1]).map_err(|e| {
            MoneyplanError::Validation(format!("Invalid percentage '{}': {}", parts[1].trim(), e))
        })?;

        let kind = match parts.get(2).map(|k| k.trim()) {
            Some(k) if !k.is_empty() => ModuleKind::parse(k).ok_or_else(|| {
                MoneyplanError::Validation(format!(
                    "Invalid module type '{}': expected expense, income, saving, emergency, or custom",
                    k
                ))
            })?,
            _ => ModuleKind::Expense,
        };

        let color = parts
            .get(3)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            name: name.to_string(),
            percentage,
            kind,
            color,
        })
    }
}

/// Validate a proposed set of module splits
///
/// Checks module count, name uniqueness, color format, and that the
/// percentages sum to exactly 100.
pub fn validate_specs(specs: &[ModuleSpec]) -> MoneyplanResult<()> {
    if specs.is_empty() || specs.len() > MAX_MODULES {
        return Err(MoneyplanError::Validation(format!(
            "A plan needs between 1 and {} modules (got {})",
            MAX_MODULES,
            specs.len()
        )));
    }

    for (i, spec) in specs.iter().enumerate() {
        if spec.name.trim().is_empty() {
            return Err(MoneyplanError::Validation(
                "Module name cannot be empty".into(),
            ));
        }

        if spec.name.len() > 50 {
            return Err(MoneyplanError::Validation(format!(
                "Module name too long ({} chars, max 50)",
                spec.name.len()
            )));
        }

        if let Some(color) = &spec.color {
            if !is_valid_color(color) {
                return Err(MoneyplanError::Validation(format!(
                    "Invalid color '{}' for module '{}': expected #RRGGBB",
                    color, spec.name
                )));
            }
        }

        let duplicate = specs[..i]
            .iter()
            .any(|other| other.name.eq_ignore_ascii_case(&spec.name));
        if duplicate {
            return Err(MoneyplanError::Validation(format!(
                "Duplicate module name '{}'",
                spec.name
            )));
        }
    }

    let sum: Decimal = specs.iter().map(|s| s.percentage.value()).sum();
    if sum != Decimal::ONE_HUNDRED {
        return Err(MoneyplanError::Validation(format!(
            "Total percentage must be 100% (got {}%)",
            sum.normalize()
        )));
    }

    Ok(())
}

/// Build funded modules from validated specs
///
/// Each module starts with `balance = total * percentage / 100` and an
/// empty transaction history. Missing colors are filled from the default
/// palette by position. Callers validate specs first; with percentages
/// summing to 100 the balances sum back to the total exactly.
pub fn allocate(total_balance: Money, specs: &[ModuleSpec]) -> Vec<Module> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let color = spec
                .color
                .clone()
                .unwrap_or_else(|| default_color(i).to_string());
            let balance = spec.percentage.share_of(total_balance);
            Module::new(spec.kind, spec.name.clone(), spec.percentage, color, balance)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PALETTE;

    fn pct(value: i64) -> Percent {
        Percent::new(Decimal::from(value)).unwrap()
    }

    #[test]
    fn test_parse_name_and_percent() {
        let spec: ModuleSpec = "Food:60".parse().unwrap();
        assert_eq!(spec.name, "Food");
        assert_eq!(spec.percentage, pct(60));
        assert_eq!(spec.kind, ModuleKind::Expense);
        assert!(spec.color.is_none());
    }

    #[test]
    fn test_parse_with_kind_and_color() {
        let spec: ModuleSpec = "Rainy Day:20:saving:#B6FFD9".parse().unwrap();
        assert_eq!(spec.name, "Rainy Day");
        assert_eq!(spec.kind, ModuleKind::Saving);
        assert_eq!(spec.color.as_deref(), Some("#B6FFD9"));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec: ModuleSpec = " Food : 60 ".parse().unwrap();
        assert_eq!(spec.name, "Food");
        assert_eq!(spec.percentage, pct(60));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("Food".parse::<ModuleSpec>().is_err());
        assert!(":60".parse::<ModuleSpec>().is_err());
        assert!("Food:abc".parse::<ModuleSpec>().is_err());
        assert!("Food:120".parse::<ModuleSpec>().is_err());
        assert!("Food:60:stocks".parse::<ModuleSpec>().is_err());
        assert!("Food:60:expense:#FFF:extra".parse::<ModuleSpec>().is_err());
    }

    #[test]
    fn test_validate_accepts_exact_split() {
        let specs = vec![
            ModuleSpec::new("Food", pct(60)),
            ModuleSpec::new("Rent", pct(40)),
        ];
        assert!(validate_specs(&specs).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_too_many() {
        assert!(validate_specs(&[]).is_err());

        let specs: Vec<ModuleSpec> = (0..9)
            .map(|i| ModuleSpec::new(format!("Module {}", i), pct(10)))
            .collect();
        let err = validate_specs(&specs).unwrap_err();
        assert!(err.to_string().contains("between 1 and 8"));
    }

    #[test]
    fn test_validate_rejects_sum_not_100() {
        let specs = vec![
            ModuleSpec::new("Food", pct(60)),
            ModuleSpec::new("Rent", pct(39)),
        ];
        let err = validate_specs(&specs).unwrap_err();
        assert!(err.to_string().contains("must be 100%"));
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let specs = vec![
            ModuleSpec::new("Food", pct(60)),
            ModuleSpec::new("food", pct(40)),
        ];
        let err = validate_specs(&specs).unwrap_err();
        assert!(err.to_string().contains("Duplicate module name"));
    }

    #[test]
    fn test_validate_rejects_long_name() {
        let specs = vec![ModuleSpec::new("F".repeat(51), pct(100))];
        let err = validate_specs(&specs).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let specs =
            vec![ModuleSpec::new("Food", pct(100)).with_color("red")];
        assert!(validate_specs(&specs).is_err());
    }

    #[test]
    fn test_allocate_splits_total() {
        let specs = vec![
            ModuleSpec::new("Food", pct(60)),
            ModuleSpec::new("Rent", pct(40)),
        ];
        let modules = allocate(Money::from_major(1000), &specs);

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].balance, Money::from_major(600));
        assert_eq!(modules[1].balance, Money::from_major(400));
        assert!(modules.iter().all(|m| m.transactions.is_empty()));
    }

    #[test]
    fn test_allocate_balances_sum_to_total() {
        let specs = vec![
            ModuleSpec::new("A", Percent::parse("33.33").unwrap()),
            ModuleSpec::new("B", Percent::parse("33.33").unwrap()),
            ModuleSpec::new("C", Percent::parse("33.34").unwrap()),
        ];
        validate_specs(&specs).unwrap();

        let total = Money::from_major(1000);
        let modules = allocate(total, &specs);
        let sum: Money = modules.iter().map(|m| m.balance).sum();
        assert_eq!(sum, total);
    }

    #[test]
    fn test_allocate_fills_palette_colors() {
        let specs = vec![
            ModuleSpec::new("Food", pct(50)),
            ModuleSpec::new("Rent", pct(50)).with_color("#123ABC"),
        ];
        let modules = allocate(Money::from_major(100), &specs);

        assert_eq!(modules[0].color, DEFAULT_PALETTE[0]);
        assert_eq!(modules[1].color, "#123ABC");
    }
}
