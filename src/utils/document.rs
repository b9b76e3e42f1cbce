/// CPF sent when the storefront gives us nothing usable.
pub const DEFAULT_CPF: &str = "00000000191";

/// Limpa CPF/CNPJ: mantém só os dígitos.
pub fn clean_document(document: Option<&str>) -> String {
    let digits: String = document
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        DEFAULT_CPF.to_string()
    } else {
        digits
    }
}
