//! Credit enhancement guarantee.

use super::FieldKind::{Address, Enum, Int, Uint};
use super::{FamilySchema, STANDARD_STATE, TermsField};

pub static CEG: FamilySchema = FamilySchema {
    name: "CEG",
    terms: &[
        TermsField::scalar("contractType", Enum),
        TermsField::scalar("calendar", Enum),
        TermsField::scalar("contractRole", Enum),
        TermsField::scalar("dayCountConvention", Enum),
        TermsField::scalar("businessDayConvention", Enum),
        TermsField::scalar("endOfMonthConvention", Enum),
        TermsField::scalar("feeBasis", Enum),
        TermsField::scalar("creditEventTypeCovered", Enum),
        TermsField::scalar("currency", Address),
        TermsField::scalar("settlementCurrency", Address),
        TermsField::scalar("contractDealDate", Uint),
        TermsField::scalar("statusDate", Uint),
        TermsField::scalar("maturityDate", Uint),
        TermsField::scalar("purchaseDate", Uint),
        TermsField::scalar("cycleAnchorDateOfFee", Uint),
        TermsField::scalar("notionalPrincipal", Int),
        TermsField::scalar("feeRate", Int),
        TermsField::scalar("feeAccrued", Int),
        TermsField::scalar("delinquencyRate", Int),
        TermsField::scalar("priceAtPurchaseDate", Uint),
        TermsField::scalar("coverageOfCreditEnhancement", Int),
        TermsField::period("gracePeriod"),
        TermsField::period("delinquencyPeriod"),
        TermsField::cycle("cycleOfFee"),
        TermsField::reference("contractReference_1"),
        TermsField::reference("contractReference_2"),
    ],
    state: STANDARD_STATE,
    has_extension: false,
    updates_obligor: false,
    updates_state: false,
    updates_terms: false,
};
