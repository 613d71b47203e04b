/// Membres de l'espace Schengen (codes ISO-3166 alpha-2).
///
/// L'Irlande ("IE") est membre de l'UE mais hors Schengen ; la Suisse, la
/// Norvège, l'Islande et le Liechtenstein sont dans Schengen sans être dans
/// l'UE. Liste unique et autoritaire : tout contrôle de pays passe par ici.
pub const SCHENGEN_MEMBERS: [&str; 29] = [
    "AT", "BE", "BG", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GR", "HR", "HU", "IS",
    "IT", "LI", "LT", "LU", "LV", "MT", "NL", "NO", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Indique si `code` désigne un pays de l'espace Schengen.
///
/// Un code inconnu, vide ou hors Schengen renvoie `false`, jamais d'erreur :
/// seul un séjour dans un pays Schengen compte des jours de présence.
pub fn is_schengen(code: &str) -> bool {
    let code = code.trim();
    if code.len() != 2 {
        return false;
    }
    let upper = code.to_ascii_uppercase();
    SCHENGEN_MEMBERS.contains(&upper.as_str())
}
