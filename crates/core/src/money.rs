//! # Money Module
//!
//! Hằng số tiền tệ và định dạng hiển thị số dư.
//! Số tiền là i64 nguyên (đơn vị USD), không dùng số thập phân.

/// Mã tiền tệ hiển thị
pub const CURRENCY: &str = "USD";

/// Số dư tối thiểu mà một giao dịch trừ tiền phải giữ lại
pub const MINIMUM_BALANCE: i64 = 1_000;

/// Số dư khởi tạo khi mở tài khoản mới
pub const DEFAULT_STARTING_BALANCE: i64 = 500_000;

/// Ngưỡng "wealth tier" - chỉ dùng cho hiển thị, không mang nghiệp vụ.
/// Sắp xếp từ cao xuống thấp.
const WEALTH_TIERS: [(i64, &str); 3] = [
    (10_000_000_000_000, "You have truly ascended the Matrix..."),
    (10_000_000_000, "What color is your Bugatti today?"),
    (10_000_000, "Buss itna paisa chaiye zindagi main"),
];

/// Định dạng số tiền: `USD 500,000.00`
pub fn format_currency(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("{} -{}.00", CURRENCY, grouped)
    } else {
        format!("{} {}.00", CURRENCY, grouped)
    }
}

/// Trả về flavor message cho số dư, nếu vượt ngưỡng nào đó.
///
/// Presentation hook: chỉ tầng CLI dùng, ledger không quan tâm.
pub fn wealth_message(balance: i64) -> Option<&'static str> {
    WEALTH_TIERS
        .iter()
        .find(|(threshold, _)| balance >= *threshold)
        .map(|(_, message)| *message)
}
