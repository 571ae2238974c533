//! Principal at maturity.

use super::FieldKind::{Address, Bytes32, Enum, Int, Uint};
use super::{FamilySchema, STANDARD_STATE, TermsField};

pub static PAM: FamilySchema = FamilySchema {
    name: "PAM",
    terms: &[
        TermsField::scalar("contractType", Enum),
        TermsField::scalar("calendar", Enum),
        TermsField::scalar("contractRole", Enum),
        TermsField::scalar("dayCountConvention", Enum),
        TermsField::scalar("businessDayConvention", Enum),
        TermsField::scalar("endOfMonthConvention", Enum),
        TermsField::scalar("scalingEffect", Enum),
        TermsField::scalar("penaltyType", Enum),
        TermsField::scalar("feeBasis", Enum),
        TermsField::scalar("currency", Address),
        TermsField::scalar("settlementCurrency", Address),
        TermsField::scalar("marketObjectCodeRateReset", Bytes32),
        TermsField::scalar("contractDealDate", Uint),
        TermsField::scalar("statusDate", Uint),
        TermsField::scalar("initialExchangeDate", Uint),
        TermsField::scalar("maturityDate", Uint),
        TermsField::scalar("purchaseDate", Uint),
        TermsField::scalar("capitalizationEndDate", Uint),
        TermsField::scalar("cycleAnchorDateOfInterestPayment", Uint),
        TermsField::scalar("cycleAnchorDateOfRateReset", Uint),
        TermsField::scalar("cycleAnchorDateOfScalingIndex", Uint),
        TermsField::scalar("cycleAnchorDateOfFee", Uint),
        TermsField::scalar("notionalPrincipal", Int),
        TermsField::scalar("nominalInterestRate", Int),
        TermsField::scalar("accruedInterest", Int),
        TermsField::scalar("rateMultiplier", Int),
        TermsField::scalar("rateSpread", Int),
        TermsField::scalar("nextResetRate", Int),
        TermsField::scalar("feeRate", Int),
        TermsField::scalar("feeAccrued", Int),
        TermsField::scalar("penaltyRate", Int),
        TermsField::scalar("delinquencyRate", Int),
        TermsField::scalar("premiumDiscountAtIED", Int),
        TermsField::scalar("priceAtPurchaseDate", Uint),
        TermsField::scalar("lifeCap", Int),
        TermsField::scalar("lifeFloor", Int),
        TermsField::scalar("periodCap", Int),
        TermsField::scalar("periodFloor", Int),
        TermsField::period("gracePeriod"),
        TermsField::period("delinquencyPeriod"),
        TermsField::cycle("cycleOfInterestPayment"),
        TermsField::cycle("cycleOfRateReset"),
        TermsField::cycle("cycleOfScalingIndex"),
        TermsField::cycle("cycleOfFee"),
    ],
    state: STANDARD_STATE,
    has_extension: false,
    updates_obligor: false,
    updates_state: false,
    updates_terms: false,
};
