//! Stock.

use super::FieldKind::{Address, Enum, Int, Uint};
use super::{FamilySchema, FieldSpec, TermsField};

pub static STK: FamilySchema = FamilySchema {
    name: "STK",
    terms: &[
        TermsField::scalar("contractType", Enum),
        TermsField::scalar("calendar", Enum),
        TermsField::scalar("contractRole", Enum),
        TermsField::scalar("dayCountConvention", Enum),
        TermsField::scalar("businessDayConvention", Enum),
        TermsField::scalar("endOfMonthConvention", Enum),
        TermsField::scalar("redeemableByIssuer", Enum),
        TermsField::scalar("currency", Address),
        TermsField::scalar("settlementCurrency", Address),
        TermsField::scalar("statusDate", Uint),
        TermsField::scalar("issueDate", Uint),
        TermsField::scalar("purchaseDate", Uint),
        TermsField::scalar("cycleAnchorDateOfDividend", Uint),
        TermsField::scalar("nominalPrice", Int),
        TermsField::scalar("notionalPrincipal", Int),
        TermsField::scalar("issuePrice", Int),
        TermsField::scalar("quantity", Int),
        TermsField::scalar("priceAtPurchaseDate", Uint),
        TermsField::scalar("redemptionPrice", Int),
        TermsField::period("dividendRecordPeriod"),
        TermsField::period("dividendPaymentPeriod"),
        TermsField::period("splitSettlementPeriod"),
        TermsField::period("redemptionRecordPeriod"),
        TermsField::period("redemptionPaymentPeriod"),
        TermsField::cycle("cycleOfDividend"),
    ],
    state: &[
        FieldSpec::new("contractPerformance", Enum),
        FieldSpec::new("statusDate", Uint),
        FieldSpec::new("nonPerformingDate", Uint),
        FieldSpec::new("maturityDate", Uint),
        FieldSpec::new("exerciseDate", Uint),
        FieldSpec::new("terminationDate", Uint),
        FieldSpec::new("lastDividendFixingDate", Uint),
        FieldSpec::new("notionalPrincipal", Int),
        FieldSpec::new("exerciseAmount", Int),
        FieldSpec::new("exerciseQuantity", Int),
        FieldSpec::new("quantity", Int),
        FieldSpec::new("couponAmountFixed", Int),
        FieldSpec::new("marginFactor", Int),
        FieldSpec::new("adjustmentFactor", Int),
        FieldSpec::new("dividendPaymentAmount", Int),
        FieldSpec::new("splitRatio", Int),
    ],
    has_extension: false,
    updates_obligor: true,
    updates_state: true,
    updates_terms: true,
};
