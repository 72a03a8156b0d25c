//! Placeholder trial monitor data shown when the analytics backend cannot be reached.
//!
//! The counts are random, but shaped like real data: trial accounts are idle in
//! about half of the ranges, other accounts transact steadily.

use rand::Rng;
use time::{Date, Month};

use crate::account::AccountType;

use super::core::{RangeCount, TrialAccount, TrialMetadata};

const SAMPLE_ACCOUNTS: [(&str, &str, AccountType, &str, &str, &str); 6] = [
    (
        "d33cd122-cc98-48d4-ab8f-b570c854030e",
        "CÔNG TY CỔ PHẦN XE KHÁCH PHƯƠNG TRANG - FUTA BUS LINES",
        AccountType::Trial,
        "Nguyễn Văn A",
        "nguyenvana@futalines.vn",
        "0901234567",
    ),
    (
        "ac6052de-8812-4f99-8c0d-d57cc9bd3c6d",
        "VPBANK - NGÂN HÀNG TMCP VIỆT NAM THỊNH VƯỢNG",
        AccountType::Enterprise,
        "Lê Thị B",
        "lethi.b@vpbank.com.vn",
        "0912345678",
    ),
    (
        "7a6b8c9d-e0f1-2a3b-4c5d-6e7f8a9b0c1d",
        "TECHCOMBANK - NGÂN HÀNG TMCP KỸ THƯƠNG VIỆT NAM",
        AccountType::Standard,
        "Trần Văn C",
        "tranvanc@techcombank.com.vn",
        "0923456789",
    ),
    (
        "2b3c4d5e-6f7a-8b9c-0d1e-2f3a4b5c6d7e",
        "VIETCOMBANK - NGÂN HÀNG TMCP NGOẠI THƯƠNG VIỆT NAM",
        AccountType::Enterprise,
        "Phạm Thị D",
        "phamthid@vietcombank.com.vn",
        "0934567890",
    ),
    (
        "8a9b0c1d-2e3f-4a5b-6c7d-8e9f0a1b2c3d",
        "AGRIBANK - NGÂN HÀNG NÔNG NGHIỆP VÀ PHÁT TRIỂN NÔNG THÔN VIỆT NAM",
        AccountType::Internal,
        "Hoàng Văn E",
        "hoangvane@agribank.com.vn",
        "0945678901",
    ),
    (
        "3c4d5e6f-7a8b-9c0d-1e2f-3a4b5c6d7e8f",
        "BIDV - NGÂN HÀNG ĐẦU TƯ VÀ PHÁT TRIỂN VIỆT NAM",
        AccountType::Trial,
        "Võ Thị F",
        "vothif@bidv.com.vn",
        "0956789012",
    ),
];

/// Three letter month names for the `range_count` months up to and including
/// the month of `today`, oldest first.
fn recent_month_labels(range_count: usize, today: Date) -> Vec<String> {
    let mut month = today.month();
    let mut labels = Vec::with_capacity(range_count);

    for _ in 0..range_count {
        labels.push(month_abbreviation(month).to_owned());
        month = month.previous();
    }

    labels.reverse();
    labels
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn sample_count(account_type: AccountType, rng: &mut impl Rng) -> f64 {
    match account_type {
        AccountType::Trial => {
            if rng.gen_bool(0.5) {
                f64::from(rng.gen_range(0..15_000))
            } else {
                0.0
            }
        }
        account_type => {
            let base = if account_type == AccountType::Enterprise {
                20_000
            } else {
                5_000
            };
            f64::from(base + rng.gen_range(0..base * 2))
        }
    }
}

/// Generate sample trial monitor accounts with one count per month for the
/// last `range_count` months.
pub fn generate_sample_data(
    range_count: usize,
    today: Date,
    rng: &mut impl Rng,
) -> Vec<TrialAccount> {
    let labels = recent_month_labels(range_count, today);

    SAMPLE_ACCOUNTS
        .iter()
        .map(
            |&(account_id, name, account_type, contact_name, email, phone)| TrialAccount {
                account_id: account_id.to_owned(),
                name: name.to_owned(),
                account_type,
                metadata: Some(TrialMetadata {
                    contact_name: Some(contact_name.to_owned()),
                    email: Some(email.to_owned()),
                    phone: Some(phone.to_owned()),
                }),
                monthly_data: labels
                    .iter()
                    .map(|label| RangeCount {
                        label: label.clone(),
                        range: None,
                        valid_txn_cnt: sample_count(account_type, rng),
                    })
                    .collect(),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use time::macros::date;

    use crate::account::AccountType;

    use super::{generate_sample_data, recent_month_labels};

    #[test]
    fn month_labels_end_with_current_month_and_wrap_around_the_year() {
        let labels = recent_month_labels(4, date!(2025 - 02 - 14));

        assert_eq!(labels, ["Nov", "Dec", "Jan", "Feb"]);
    }

    #[test]
    fn every_account_has_one_count_per_range() {
        let mut rng = StdRng::seed_from_u64(42);

        let accounts = generate_sample_data(5, date!(2025 - 06 - 01), &mut rng);

        assert_eq!(accounts.len(), 6);
        for account in &accounts {
            assert_eq!(account.monthly_data.len(), 5);
            assert_eq!(account.monthly_data[4].label, "Jun");
        }
    }

    #[test]
    fn counts_stay_within_expected_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        let accounts = generate_sample_data(24, date!(2025 - 06 - 01), &mut rng);

        for account in accounts {
            let (low, high) = match account.account_type {
                AccountType::Trial => (0.0, 15_000.0),
                AccountType::Enterprise => (20_000.0, 60_000.0),
                _ => (5_000.0, 15_000.0),
            };
            for range in &account.monthly_data {
                assert!(
                    (low..high).contains(&range.valid_txn_cnt),
                    "{} outside {low}..{high}",
                    range.valid_txn_cnt
                );
            }
        }
    }
}
