//! Built-in account summaries shown when the analytics backend cannot be reached.

use super::core::{AccountSummary, AccountSummaryRow, AccountType, Contact, Metadata};

fn contact(name: Option<&str>, email: &str, phone: Option<&str>) -> Metadata {
    Metadata {
        contact: Contact {
            name: name.map(str::to_owned),
            email: Some(email.to_owned()),
            phone: phone.map(str::to_owned),
        },
        time_zone: "GMT+7".to_owned(),
    }
}

fn sample_row(
    account_id: &str,
    name: &str,
    account_type: AccountType,
    metadata: Metadata,
    valid_txn_cnt: f64,
    valid_txn_cnt_range_before: f64,
) -> AccountSummaryRow {
    AccountSummaryRow {
        account_id: account_id.to_owned(),
        name: name.to_owned(),
        account_type,
        metadata,
        valid_txn_cnt,
        valid_txn_cnt_range_before,
    }
}

/// Get the sample account summaries with their diffs and percentages filled in.
pub fn sample_account_summaries() -> Vec<AccountSummary> {
    [
        sample_row(
            "d33cd122-cc98-48d4-ab8f-b570c854030e",
            "CÔNG TY CỔ PHẦN XE KHÁCH PHƯƠNG TRANG - FUTA BUS LINES",
            AccountType::Trial,
            contact(Some("Anh Huỳnh"), "huynh.dinh@futa.vn", Some("0946980368")),
            246_508_835.44,
            177_345_487.08,
        ),
        sample_row(
            "ac6052de-8812-4f99-8c0d-d57cc9bd3c6d",
            "VPBANK - NGÂN HÀNG TMCP VIỆT NAM THỊNH VƯỢNG",
            AccountType::Enterprise,
            contact(None, "haint46@vpbank.com.vn", None),
            8_232_256.16,
            3_551_780.4,
        ),
        sample_row(
            "7a6b8c9d-e0f1-2a3b-4c5d-6e7f8a9b0c1d",
            "TECHCOMBANK - NGÂN HÀNG TMCP KỸ THƯƠNG VIỆT NAM",
            AccountType::Standard,
            contact(
                Some("Nguyễn Văn A"),
                "nguyen.van.a@techcombank.com.vn",
                Some("0901234567"),
            ),
            154_326_789.25,
            135_489_321.78,
        ),
        sample_row(
            "2b3c4d5e-6f7a-8b9c-0d1e-2f3a4b5c6d7e",
            "VIETCOMBANK - NGÂN HÀNG TMCP NGOẠI THƯƠNG VIỆT NAM",
            AccountType::Enterprise,
            contact(
                Some("Trần Thị B"),
                "tran.thi.b@vietcombank.com.vn",
                Some("0912345678"),
            ),
            321_456_789.32,
            298_765_432.1,
        ),
        sample_row(
            "8a9b0c1d-2e3f-4a5b-6c7d-8e9f0a1b2c3d",
            "AGRIBANK - NGÂN HÀNG NÔNG NGHIỆP VÀ PHÁT TRIỂN NÔNG THÔN VIỆT NAM",
            AccountType::Internal,
            contact(
                Some("Lê Văn C"),
                "le.van.c@agribank.com.vn",
                Some("0923456789"),
            ),
            98_765_432.1,
            87_654_321.09,
        ),
    ]
    .into_iter()
    .map(AccountSummary::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::sample_account_summaries;

    #[test]
    fn sample_accounts_have_unique_ids() {
        let accounts = sample_account_summaries();
        let ids: HashSet<_> = accounts.iter().map(|a| a.account_id.as_str()).collect();

        assert_eq!(ids.len(), accounts.len());
    }

    #[test]
    fn sample_accounts_have_derived_fields() {
        for account in sample_account_summaries() {
            assert_eq!(
                account.diff,
                account.valid_txn_cnt - account.valid_txn_cnt_range_before
            );
            assert!(account.percentage > 0.0, "{account:?}");
        }
    }
}
