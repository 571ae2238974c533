//! Annuity: principal and interest amortised in equal instalments.

use super::FieldKind::{Address, Bytes32, Enum, Int, Uint};
use super::{FamilySchema, FieldSpec, TermsField};

pub static ANN: FamilySchema = FamilySchema {
    name: "ANN",
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
        TermsField::scalar("cycleAnchorDateOfPrincipalRedemption", Uint),
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
        TermsField::scalar("nextPrincipalRedemptionPayment", Int),
        TermsField::scalar("lifeCap", Int),
        TermsField::scalar("lifeFloor", Int),
        TermsField::scalar("periodCap", Int),
        TermsField::scalar("periodFloor", Int),
        TermsField::period("gracePeriod"),
        TermsField::period("delinquencyPeriod"),
        TermsField::cycle("cycleOfInterestPayment"),
        TermsField::cycle("cycleOfScalingIndex"),
        TermsField::cycle("cycleOfFee"),
        TermsField::cycle("cycleOfPrincipalRedemption"),
    ],
    state: &[
        FieldSpec::new("contractPerformance", Enum),
        FieldSpec::new("statusDate", Uint),
        FieldSpec::new("nonPerformingDate", Uint),
        FieldSpec::new("maturityDate", Uint),
        FieldSpec::new("exerciseDate", Uint),
        FieldSpec::new("terminationDate", Uint),
        FieldSpec::new("notionalPrincipal", Int),
        FieldSpec::new("accruedInterest", Int),
        FieldSpec::new("feeAccrued", Int),
        FieldSpec::new("nominalInterestRate", Int),
        FieldSpec::new("interestScalingMultiplier", Int),
        FieldSpec::new("notionalScalingMultiplier", Int),
        FieldSpec::new("nextPrincipalRedemptionPayment", Int),
        FieldSpec::new("exerciseAmount", Int),
    ],
    has_extension: false,
    updates_obligor: false,
    updates_state: false,
    updates_terms: false,
};
