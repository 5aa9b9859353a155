//! Fixed matrix of legal (instrument type, subtype) list filters.

use crate::{InstrumentSubType, InstrumentType};

/// Legal filter combinations for the instrument list endpoints. The
/// remote API rejects anything outside this matrix, so it is checked
/// locally before a request is built.
pub const ALLOWED_COMBINATIONS: &[(InstrumentType, InstrumentSubType)] = &[
    (InstrumentType::Acciones, InstrumentSubType::Lideres),
    (InstrumentType::Acciones, InstrumentSubType::General),
    (InstrumentType::Bonos, InstrumentSubType::Ars),
    (InstrumentType::Bonos, InstrumentSubType::Usd),
    (InstrumentType::Bonos, InstrumentSubType::Prov),
    (InstrumentType::Bonos, InstrumentSubType::Cer),
    (InstrumentType::Cedears, InstrumentSubType::Top),
    (InstrumentType::Cedears, InstrumentSubType::New),
    (InstrumentType::Cedears, InstrumentSubType::Etf),
    (InstrumentType::Cedears, InstrumentSubType::Crypto),
    (InstrumentType::Corp, InstrumentSubType::Corp),
    (InstrumentType::Letras, InstrumentSubType::Fixed),
    (InstrumentType::Letras, InstrumentSubType::Cer),
    (InstrumentType::Fci, InstrumentSubType::Pf),
    (InstrumentType::Fci, InstrumentSubType::Otros),
    (InstrumentType::Fci, InstrumentSubType::None),
    (InstrumentType::Repo, InstrumentSubType::None),
];

/// True iff the pair appears in [`ALLOWED_COMBINATIONS`].
pub fn validate_list_parameters(
    instrument_type: InstrumentType,
    subtype: InstrumentSubType,
) -> bool {
    ALLOWED_COMBINATIONS
        .iter()
        .any(|&(allowed_type, allowed_subtype)| {
            allowed_type == instrument_type && allowed_subtype == subtype
        })
}
