//! Validator
//!
//! Applies the offer rule set to normalised candidates and collects every problem found, not
//! just the first. Errors are ordered by row, then by rule within a row.

use std::{borrow::Cow, fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{
    normalize::OfferCandidate,
    offers::{Category, Field, OfferDetails, Operator},
    parser::RawRow,
};

/// Lowest accepted selling price.
pub const MIN_PRICE: i64 = 1;

/// Highest accepted selling price.
pub const MAX_PRICE: i64 = 10_000;

/// Shortest accepted validity in days.
pub const MIN_VALIDITY: i64 = 1;

/// Longest accepted validity in days.
pub const MAX_VALIDITY: i64 = 365;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Which rule produced a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// A required field is missing or blank.
    Required,

    /// The operator is not one of the known operators.
    Operator,

    /// The selling price is not a number in range.
    PriceRange,

    /// The validity is not a number in range.
    ValidityRange,

    /// The title is too long.
    TitleLength,

    /// Minutes are not a non-negative number.
    Minutes,

    /// The original price is not a number in range.
    OriginalPrice,

    /// The category is not one of the known categories.
    Category,

    /// The description is too long.
    DescriptionLength,
}

impl Rule {
    /// Snake-case identifier, as serialised.
    pub const fn as_str(self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Operator => "operator",
            Rule::PriceRange => "price_range",
            Rule::ValidityRange => "validity_range",
            Rule::TitleLength => "title_length",
            Rule::Minutes => "minutes",
            Rule::OriginalPrice => "original_price",
            Rule::Category => "category",
            Rule::DescriptionLength => "description_length",
        }
    }
}

/// Validation Error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based data row number
    pub row: usize,

    /// Offending field
    pub field: Field,

    /// Offending raw value, empty when the field was missing
    pub value: String,

    /// Human-readable reason
    pub message: String,

    /// Rule that failed
    pub rule: Rule,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Validation bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    /// Accepted selling (and original) prices
    pub price: RangeInclusive<i64>,

    /// Accepted validity in days
    pub validity: RangeInclusive<i64>,

    /// Maximum title length in characters
    pub max_title_length: usize,

    /// Maximum description length in characters
    pub max_description_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            price: MIN_PRICE..=MAX_PRICE,
            validity: MIN_VALIDITY..=MAX_VALIDITY,
            max_title_length: MAX_TITLE_LENGTH,
            max_description_length: MAX_DESCRIPTION_LENGTH,
        }
    }
}

/// Anything the rule set can read field text from.
pub trait FieldSource {
    /// Trimmed text of a field, `None` when missing or blank.
    fn field_value(&self, field: Field) -> Option<Cow<'_, str>>;
}

impl FieldSource for RawRow {
    fn field_value(&self, field: Field) -> Option<Cow<'_, str>> {
        self.field(field).map(Cow::Borrowed)
    }
}

impl FieldSource for OfferDetails {
    fn field_value(&self, field: Field) -> Option<Cow<'_, str>> {
        let text = self.field_text(field);
        let trimmed = text.trim();

        (!trimmed.is_empty()).then(|| Cow::Owned(trimmed.to_string()))
    }
}

/// Client-side pre-check result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCheck {
    /// Offers from rows without any error
    pub valid_offers: Vec<OfferDetails>,

    /// Every error found
    pub errors: Vec<ValidationError>,
}

/// Validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    /// Create a validator with the given bounds.
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// The bounds in use.
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate every candidate, returning all errors in row-major, rule order.
    pub fn validate(&self, candidates: &[OfferCandidate]) -> Vec<ValidationError> {
        candidates
            .iter()
            .flat_map(|candidate| self.validate_source(candidate.row, &candidate.source))
            .collect()
    }

    /// Validate a fully typed offer, e.g. a single-record create or a merged update.
    pub fn validate_offer(&self, offer: &OfferDetails) -> Vec<ValidationError> {
        self.validate_source(1, offer)
    }

    /// Split candidates into the offers that passed and the errors of those that did not.
    pub fn check(&self, candidates: Vec<OfferCandidate>) -> ImportCheck {
        let mut check = ImportCheck::default();

        for candidate in candidates {
            let errors = self.validate_source(candidate.row, &candidate.source);

            if errors.is_empty() {
                check.valid_offers.push(candidate.offer);
            } else {
                check.errors.extend(errors);
            }
        }

        check
    }

    /// Run the full rule set against one source.
    pub fn validate_source(&self, row: usize, source: &impl FieldSource) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field: Field, value: Option<&str>, rule: Rule, message: String| {
            errors.push(ValidationError {
                row,
                field,
                value: value.unwrap_or_default().to_string(),
                message,
                rule,
            });
        };

        for field in Field::REQUIRED {
            if source.field_value(field).is_none() {
                fail(field, None, Rule::Required, format!("{field} is required"));
            }
        }

        if let Some(operator) = source.field_value(Field::Operator)
            && operator.parse::<Operator>().is_err()
        {
            fail(
                Field::Operator,
                Some(&operator),
                Rule::Operator,
                format!("operator must be one of: {}", Operator::known_names()),
            );
        }

        if let Some(price) = source.field_value(Field::SellingPrice)
            && !in_range(&price, &self.rules.price)
        {
            fail(
                Field::SellingPrice,
                Some(&price),
                Rule::PriceRange,
                range_message(Field::SellingPrice, &self.rules.price),
            );
        }

        if let Some(validity) = source.field_value(Field::ValidityDays)
            && !in_range(&validity, &self.rules.validity)
        {
            fail(
                Field::ValidityDays,
                Some(&validity),
                Rule::ValidityRange,
                range_message(Field::ValidityDays, &self.rules.validity),
            );
        }

        if let Some(title) = source.field_value(Field::Title)
            && title.chars().count() > self.rules.max_title_length
        {
            fail(
                Field::Title,
                Some(&title),
                Rule::TitleLength,
                format!(
                    "title must be at most {} characters",
                    self.rules.max_title_length
                ),
            );
        }

        if let Some(minutes) = source.field_value(Field::Minutes)
            && !in_range(&minutes, &(0..=i64::from(u32::MAX)))
        {
            fail(
                Field::Minutes,
                Some(&minutes),
                Rule::Minutes,
                "minutes must be a whole number of at least 0".to_string(),
            );
        }

        if let Some(original) = source.field_value(Field::OriginalPrice)
            && !in_range(&original, &self.rules.price)
        {
            fail(
                Field::OriginalPrice,
                Some(&original),
                Rule::OriginalPrice,
                range_message(Field::OriginalPrice, &self.rules.price),
            );
        }

        if let Some(category) = source.field_value(Field::Category)
            && category.parse::<Category>().is_err()
        {
            fail(
                Field::Category,
                Some(&category),
                Rule::Category,
                format!("category must be one of: {}", Category::known_names()),
            );
        }

        if let Some(description) = source.field_value(Field::Description)
            && description.chars().count() > self.rules.max_description_length
        {
            fail(
                Field::Description,
                Some(&description),
                Rule::DescriptionLength,
                format!(
                    "description must be at most {} characters",
                    self.rules.max_description_length
                ),
            );
        }

        errors
    }
}

fn in_range(value: &str, range: &RangeInclusive<i64>) -> bool {
    value
        .trim()
        .parse::<i64>()
        .is_ok_and(|number| range.contains(&number))
}

fn range_message(field: Field, range: &RangeInclusive<i64>) -> String {
    format!(
        "{field} must be a whole number between {} and {}",
        range.start(),
        range.end()
    )
}

#[cfg(test)]
mod tests {
    use crate::normalize::{NormalizeDefaults, normalize};

    use super::*;

    fn candidate(row: usize, values: &[(&str, &str)]) -> OfferCandidate {
        normalize(
            &RawRow::new(row, values.iter().copied()),
            &NormalizeDefaults::default(),
        )
    }

    fn valid_row(row: usize) -> OfferCandidate {
        candidate(
            row,
            &[
                ("operator", "GP"),
                ("title", "50GB Bundle"),
                ("data_amount", "50GB"),
                ("selling_price", "775"),
                ("validity_days", "30"),
            ],
        )
    }

    fn with_price(row: usize, price: &str) -> OfferCandidate {
        let mut candidate = valid_row(row);
        candidate
            .source
            .values
            .insert("selling_price".to_string(), price.to_string());
        candidate
    }

    #[test]
    fn valid_row_has_no_errors() {
        assert!(Validator::default().validate(&[valid_row(1)]).is_empty());
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let errors = Validator::default().validate(&[candidate(1, &[("minutes", "5")])]);

        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();

        assert_eq!(fields, Field::REQUIRED);
        assert!(errors.iter().all(|e| e.rule == Rule::Required));
        assert_eq!(
            errors.first().map(|e| e.message.as_str()),
            Some("operator is required")
        );
    }

    #[test]
    fn unknown_operator_lists_valid_set() {
        let mut row = valid_row(1);
        row.source
            .values
            .insert("operator".to_string(), "Teletalk".to_string());

        let errors = Validator::default().validate(&[row]);

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().map(|e| (e.rule, e.value.as_str(), e.message.as_str())),
            Some((
                Rule::Operator,
                "Teletalk",
                "operator must be one of: GP, Robi, Banglalink, Airtel, Skitto"
            ))
        );
    }

    #[test]
    fn price_boundaries() {
        let validator = Validator::default();

        for price in ["1", "10000"] {
            assert!(
                validator.validate(&[with_price(1, price)]).is_empty(),
                "price {price} should pass"
            );
        }

        for price in ["0", "10001", "abc", "-1"] {
            let errors = validator.validate(&[with_price(1, price)]);

            assert_eq!(errors.len(), 1, "price {price} should fail once");
            assert_eq!(errors.first().map(|e| e.rule), Some(Rule::PriceRange));
            assert_eq!(errors.first().map(|e| e.value.as_str()), Some(price));
        }
    }

    #[test]
    fn validity_range_is_enforced() {
        let mut row = valid_row(1);
        row.source
            .values
            .insert("validity_days".to_string(), "366".to_string());

        let errors = Validator::default().validate(&[row]);

        assert_eq!(
            errors.first().map(|e| e.message.as_str()),
            Some("validity_days must be a whole number between 1 and 365")
        );
    }

    #[test]
    fn title_length_counts_characters() {
        let validator = Validator::default();

        let mut ok = valid_row(1);
        ok.source
            .values
            .insert("title".to_string(), "অ".repeat(100));

        let mut long = valid_row(2);
        long.source
            .values
            .insert("title".to_string(), "a".repeat(101));

        let errors = validator.validate(&[ok, long]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| (e.row, e.rule)), Some((2, Rule::TitleLength)));
    }

    #[test]
    fn one_row_may_fail_several_rules_in_rule_order() {
        let row = candidate(
            3,
            &[
                ("operator", "Teletalk"),
                ("title", "Pack"),
                ("data_amount", "1GB"),
                ("selling_price", "0"),
                ("validity_days", "400"),
                ("minutes", "-10"),
                ("category", "voice"),
            ],
        );

        let rules: Vec<Rule> = Validator::default()
            .validate(&[row])
            .iter()
            .map(|e| e.rule)
            .collect();

        assert_eq!(
            rules,
            [
                Rule::Operator,
                Rule::PriceRange,
                Rule::ValidityRange,
                Rule::Minutes,
                Rule::Category
            ]
        );
    }

    #[test]
    fn errors_are_reported_for_exactly_the_failing_rows() {
        let rows: Vec<OfferCandidate> = (1..=7)
            .map(|row| {
                if row == 2 || row == 5 {
                    with_price(row, "abc")
                } else {
                    valid_row(row)
                }
            })
            .collect();

        let failing: Vec<usize> = Validator::default()
            .validate(&rows)
            .iter()
            .map(|e| e.row)
            .collect();

        assert_eq!(failing, [2, 5]);
    }

    #[test]
    fn validation_is_deterministic() {
        let rows = [with_price(1, "0"), candidate(2, &[]), valid_row(3)];
        let validator = Validator::default();

        assert_eq!(validator.validate(&rows), validator.validate(&rows));
    }

    #[test]
    fn original_price_below_selling_price_is_accepted() {
        let mut row = valid_row(1);
        row.source
            .values
            .insert("original_price".to_string(), "100".to_string());

        assert!(Validator::default().validate(&[row]).is_empty());
    }

    #[test]
    fn check_splits_valid_offers_from_errors() {
        let check = Validator::default().check(vec![valid_row(1), with_price(2, "abc")]);

        assert_eq!(check.valid_offers.len(), 1);
        assert_eq!(check.errors.len(), 1);
        assert_eq!(check.errors.first().map(|e| e.row), Some(2));
    }

    #[test]
    fn typed_offers_use_the_same_rules() {
        let mut offer = valid_row(1).offer;

        assert!(Validator::default().validate_offer(&offer).is_empty());

        offer.selling_price = 0;
        offer.title = String::new();

        let rules: Vec<Rule> = Validator::default()
            .validate_offer(&offer)
            .iter()
            .map(|e| e.rule)
            .collect();

        assert_eq!(rules, [Rule::Required, Rule::PriceRange]);
    }

    #[test]
    fn custom_rules_are_honoured() {
        let validator = Validator::new(ValidationRules {
            price: 10..=500,
            ..ValidationRules::default()
        });

        assert_eq!(validator.validate(&[with_price(1, "775")]).len(), 1);
        assert!(validator.validate(&[with_price(1, "499")]).is_empty());
    }

    #[test]
    fn display_includes_row_number() {
        let errors = Validator::default().validate(&[with_price(4, "abc")]);

        assert_eq!(
            errors.first().map(ToString::to_string),
            Some("Row 4: selling_price must be a whole number between 1 and 10000".to_string())
        );
    }

    #[test]
    fn rule_names_match_serialised_form() -> testresult::TestResult {
        for rule in [Rule::Required, Rule::PriceRange, Rule::DescriptionLength] {
            assert_eq!(serde_json::to_value(rule)?, rule.as_str());
        }

        Ok(())
    }
}
