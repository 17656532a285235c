/// Signed H2H v2 operations and their fixed paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum H2hEndpoint {
    InhouseInquiry,
    InterbankInquiry,
    DoPayment,
    PaymentStatus,
}

impl H2hEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            H2hEndpoint::InhouseInquiry => "/H2H/v2/getinhouseinquiry",
            H2hEndpoint::InterbankInquiry => "/H2H/v2/getinterbankinquiry",
            H2hEndpoint::DoPayment => "/H2H/v2/dopayment",
            H2hEndpoint::PaymentStatus => "/H2H/v2/getpaymentstatus",
        }
    }
}

impl std::fmt::Display for H2hEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
