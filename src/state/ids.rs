use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Cart line id: `cart_<unix millis>_<9 base36 chars>`.
pub fn generate_line_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("cart_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// 20-character alphanumeric document id.
pub fn generate_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(20)
        .map(char::from)
        .collect()
}

/// Checkout session id, `cs_` followed by 24 alphanumerics.
pub fn generate_session_id() -> String {
    let body: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("cs_{body}")
}
