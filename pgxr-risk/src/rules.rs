//! Curated CPIC gene-drug rules.
//!
//! Each supported drug is keyed to its primary gene (see
//! [Drug::primary_gene](pgxr_core::models::Drug::primary_gene)), so the table is
//! a match on `(Drug, Phenotype)`. Every pair is listed; the ones without a
//! curated rule say so explicitly and end up on the fallback.

use pgxr_core::models::{Drug, Phenotype, RiskLabel};

/// A single curated rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskRule {
    pub label: RiskLabel,
    pub confidence: f64,
    pub recommendation: &'static str,
}

const fn rule(label: RiskLabel, confidence: f64, recommendation: &'static str) -> Option<RiskRule> {
    Some(RiskRule {
        label,
        confidence,
        recommendation,
    })
}

///
/// Look up the curated rule for a drug and the phenotype of its primary gene.
///
pub fn lookup_rule(drug: Drug, phenotype: Phenotype) -> Option<RiskRule> {
    use Phenotype::*;
    use RiskLabel::*;

    match (drug, phenotype) {
        // prodrug, needs CYP2D6 activation
        (Drug::Codeine, UltraRapidMetabolizer) => rule(
            Toxic,
            0.97,
            "Avoid codeine. Ultra-rapid CYP2D6 metabolizers convert codeine to morphine \
             at an accelerated rate, risking life-threatening respiratory depression. \
             Use alternative analgesics (e.g. non-opioid agents or morphine with dose monitoring).",
        ),
        (Drug::Codeine, NormalMetabolizer) => rule(
            Safe,
            0.95,
            "Standard codeine dosing is appropriate. Monitor for standard opioid side-effects.",
        ),
        (Drug::Codeine, IntermediateMetabolizer) => rule(
            AdjustDosage,
            0.90,
            "Consider reducing codeine dose or substituting a non-CYP2D6-dependent analgesic. \
             Reduced CYP2D6 activity may result in diminished analgesia at standard doses.",
        ),
        (Drug::Codeine, PoorMetabolizer) => rule(
            Ineffective,
            0.97,
            "Avoid codeine. Poor CYP2D6 metabolizers cannot convert codeine to its active \
             metabolite morphine. Expected analgesic failure. Prescribe a non-prodrug opioid.",
        ),
        (Drug::Codeine, NormalFunction | DecreasedFunction | PoorFunction) => None,

        // prodrug, needs CYP2C19 activation
        (Drug::Clopidogrel, UltraRapidMetabolizer) => rule(
            AdjustDosage,
            0.85,
            "Standard clopidogrel dose is likely adequate. Consider monitoring platelet \
             reactivity if standard therapy appears insufficient.",
        ),
        (Drug::Clopidogrel, NormalMetabolizer) => rule(
            Safe,
            0.95,
            "Standard clopidogrel dosing is appropriate per CPIC guidelines.",
        ),
        (Drug::Clopidogrel, IntermediateMetabolizer) => rule(
            Ineffective,
            0.88,
            "Reduced clopidogrel activation. Consider alternative antiplatelet therapy \
             (e.g. prasugrel, ticagrelor) to prevent stent thrombosis or cardiovascular events.",
        ),
        (Drug::Clopidogrel, PoorMetabolizer) => rule(
            Ineffective,
            0.97,
            "Avoid clopidogrel. Poor CYP2C19 metabolizers cannot adequately activate the \
             prodrug. Risk of fatal stent thrombosis or stroke. Prescribe prasugrel or \
             ticagrelor per CPIC guidelines.",
        ),
        (Drug::Clopidogrel, NormalFunction | DecreasedFunction | PoorFunction) => None,

        // active drug, cleared by CYP2C9
        (Drug::Warfarin, UltraRapidMetabolizer) => rule(
            AdjustDosage,
            0.85,
            "Warfarin may be cleared rapidly. Consider higher initial dose and close INR \
             monitoring. Standard CPIC dosing algorithm with CYP2C9 genotype adjustment is \
             recommended.",
        ),
        (Drug::Warfarin, NormalMetabolizer) => rule(
            Safe,
            0.95,
            "Standard warfarin dosing algorithm is appropriate. Routine INR monitoring \
             per clinical guidelines.",
        ),
        (Drug::Warfarin, IntermediateMetabolizer) => rule(
            AdjustDosage,
            0.90,
            "Reduce warfarin starting dose by 25–50% (CPIC guideline). CYP2C9 \
             intermediate metabolizers have reduced clearance. Close INR monitoring required \
             during initiation.",
        ),
        (Drug::Warfarin, PoorMetabolizer) => rule(
            Toxic,
            0.95,
            "Reduce warfarin starting dose significantly (≥50% CPIC recommendation). \
             Poor CYP2C9 metabolizers clear warfarin very slowly, leading to dangerous \
             systemic accumulation and severe hemorrhagic risk. Intensive INR monitoring is \
             mandatory.",
        ),
        (Drug::Warfarin, NormalFunction | DecreasedFunction | PoorFunction) => None,

        // transporter substrate, hepatic uptake by SLCO1B1
        (Drug::Simvastatin, NormalFunction) => rule(
            Safe,
            0.94,
            "Standard simvastatin dose is appropriate. Normal SLCO1B1 transport function.",
        ),
        (Drug::Simvastatin, DecreasedFunction) => rule(
            Toxic,
            0.90,
            "Avoid high-dose simvastatin (≥40 mg/day). Reduced SLCO1B1 transport \
             function increases systemic statin exposure, significantly elevating risk of \
             statin-induced myopathy or rhabdomyolysis. Consider pravastatin or rosuvastatin \
             which are alternative transport substrates per CPIC.",
        ),
        (Drug::Simvastatin, PoorFunction) => rule(
            Toxic,
            0.96,
            "Avoid simvastatin. Poor SLCO1B1 function results in markedly elevated plasma \
             statin concentrations, with high risk of rhabdomyolysis and acute kidney injury. \
             Prescribe a low-risk statin (pravastatin, rosuvastatin) at conservative doses.",
        ),
        (
            Drug::Simvastatin,
            UltraRapidMetabolizer | NormalMetabolizer | IntermediateMetabolizer | PoorMetabolizer,
        ) => None,

        // active drug, inactivated by TPMT
        (Drug::Azathioprine, NormalMetabolizer) => rule(
            Safe,
            0.95,
            "Standard azathioprine or 6-mercaptopurine dosing is appropriate per CPIC guidelines.",
        ),
        (Drug::Azathioprine, IntermediateMetabolizer) => rule(
            AdjustDosage,
            0.90,
            "Reduce azathioprine starting dose by 30–70% (CPIC guideline). Intermediate \
             TPMT metabolizers accumulate thiopurine metabolites at elevated concentrations. \
             Monitor blood counts closely.",
        ),
        (Drug::Azathioprine, PoorMetabolizer) => rule(
            Toxic,
            0.98,
            "Avoid azathioprine / 6-mercaptopurine or reduce dose by ≥90%. Poor TPMT \
             metabolizers accumulate cytotoxic thiopurine nucleotides, causing severe, \
             potentially fatal myelosuppression and bone-marrow failure. Consider alternative \
             immunosuppressant therapy.",
        ),
        (
            Drug::Azathioprine,
            UltraRapidMetabolizer | NormalFunction | DecreasedFunction | PoorFunction,
        ) => None,

        // active drug, cleared by DPYD
        (Drug::Fluorouracil, NormalMetabolizer) => rule(
            Safe,
            0.95,
            "Standard fluorouracil dosing is appropriate. Monitor for common 5-FU toxicities.",
        ),
        (Drug::Fluorouracil, IntermediateMetabolizer) => rule(
            AdjustDosage,
            0.90,
            "Reduce fluorouracil starting dose by 25–50% (CPIC guideline). Decreased DPYD \
             activity slows 5-FU clearance, increasing risk of severe mucositis, neutropenia, \
             and treatment-limiting toxicity.",
        ),
        (Drug::Fluorouracil, PoorMetabolizer) => rule(
            Toxic,
            0.98,
            "Avoid fluorouracil / capecitabine. Poor DPYD metabolizers cannot clear 5-FU; \
             standard doses cause rapid, life-threatening systemic toxicity including \
             profound neutropenia and severe mucositis. Consider alternative chemotherapy.",
        ),
        (
            Drug::Fluorouracil,
            UltraRapidMetabolizer | NormalFunction | DecreasedFunction | PoorFunction,
        ) => None,
    }
}

/// Number of curated rules in the table.
pub fn rule_count() -> usize {
    Drug::ALL
        .iter()
        .flat_map(|&drug| Phenotype::ALL.iter().map(move |&p| (drug, p)))
        .filter(|&(drug, phenotype)| lookup_rule(drug, phenotype).is_some())
        .count()
}
