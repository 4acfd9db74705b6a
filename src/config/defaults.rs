//! Built-in default values for the diária tables.

use rust_decimal::Decimal;

/// Minimum unit rate for state capitals (470.00).
pub const DEFAULT_CAPITAL_FLOOR: Decimal = Decimal::from_parts(47000, 0, 0, false, 2);

/// Minimum unit rate for special municipalities (362.00).
pub const DEFAULT_SPECIAL_MUNICIPALITY_FLOOR: Decimal = Decimal::from_parts(36200, 0, 0, false, 2);

/// Minimum unit rate for other municipalities (258.00).
pub const DEFAULT_OTHER_MUNICIPALITY_FLOOR: Decimal = Decimal::from_parts(25800, 0, 0, false, 2);

/// Default incidental allowance ("ajuda de custo") per paid unit (74.98).
pub const DEFAULT_INCIDENTAL_ALLOWANCE: Decimal = Decimal::from_parts(7498, 0, 0, false, 2);

/// The 27 Brazilian state capitals.
pub const STATE_CAPITALS: [&str; 27] = [
    "Aracaju",
    "Belém",
    "Belo Horizonte",
    "Boa Vista",
    "Brasília",
    "Campo Grande",
    "Cuiabá",
    "Curitiba",
    "Florianópolis",
    "Fortaleza",
    "Goiânia",
    "João Pessoa",
    "Macapá",
    "Maceió",
    "Manaus",
    "Natal",
    "Palmas",
    "Porto Alegre",
    "Porto Velho",
    "Recife",
    "Rio Branco",
    "Rio de Janeiro",
    "Salvador",
    "São Luís",
    "São Paulo",
    "Teresina",
    "Vitória",
];
