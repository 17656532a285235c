use serde_json::{Map, Value};

/// Operation tags understood by the eCollection endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingOperation {
    Create,
    CreateWithSms,
    Update,
    Inquiry,
}

impl BillingOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingOperation::Create => "createbilling",
            BillingOperation::CreateWithSms => "createbillingsms",
            BillingOperation::Update => "updatebilling",
            BillingOperation::Inquiry => "inquirybilling",
        }
    }
}

impl std::fmt::Display for BillingOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for creating a virtual-account billing
#[derive(Debug, Clone, Default)]
pub struct CreateBilling {
    pub trx_id: String,
    pub trx_amount: String,
    pub billing_type: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub virtual_account: Option<String>,
    pub datetime_expired: Option<String>,
    pub description: Option<String>,
    /// Ask the bank to notify the customer by SMS
    pub send_sms: bool,
}

impl CreateBilling {
    pub fn new(
        trx_id: impl Into<String>,
        trx_amount: impl Into<String>,
        billing_type: impl Into<String>,
        customer_name: impl Into<String>,
    ) -> Self {
        Self {
            trx_id: trx_id.into(),
            trx_amount: trx_amount.into(),
            billing_type: billing_type.into(),
            customer_name: customer_name.into(),
            ..Self::default()
        }
    }

    pub fn operation(&self) -> BillingOperation {
        if self.send_sms {
            BillingOperation::CreateWithSms
        } else {
            BillingOperation::Create
        }
    }

    pub(crate) fn to_payload(&self, client_id: &str) -> Map<String, Value> {
        BillingPayload::new(self.operation(), client_id, &self.trx_id)
            .field("trx_amount", &self.trx_amount)
            .field("billing_type", &self.billing_type)
            .field("customer_name", &self.customer_name)
            .optional("customer_email", self.customer_email.as_deref())
            .optional("customer_phone", self.customer_phone.as_deref())
            .optional("virtual_account", self.virtual_account.as_deref())
            .optional("datetime_expired", self.datetime_expired.as_deref())
            .optional("description", self.description.as_deref())
            .build()
    }
}

/// Parameters for updating an existing billing
#[derive(Debug, Clone, Default)]
pub struct UpdateBilling {
    pub trx_id: String,
    pub trx_amount: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub datetime_expired: Option<String>,
    pub description: Option<String>,
}

impl UpdateBilling {
    pub fn new(
        trx_id: impl Into<String>,
        trx_amount: impl Into<String>,
        customer_name: impl Into<String>,
    ) -> Self {
        Self {
            trx_id: trx_id.into(),
            trx_amount: trx_amount.into(),
            customer_name: customer_name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn to_payload(&self, client_id: &str) -> Map<String, Value> {
        BillingPayload::new(BillingOperation::Update, client_id, &self.trx_id)
            .field("trx_amount", &self.trx_amount)
            .field("customer_name", &self.customer_name)
            .optional("customer_email", self.customer_email.as_deref())
            .optional("customer_phone", self.customer_phone.as_deref())
            .optional("datetime_expired", self.datetime_expired.as_deref())
            .optional("description", self.description.as_deref())
            .build()
    }
}

pub(crate) fn inquiry_payload(client_id: &str, trx_id: &str) -> Map<String, Value> {
    BillingPayload::new(BillingOperation::Inquiry, client_id, trx_id).build()
}

/// Sparse payload builder: absent optional values never produce a key
struct BillingPayload {
    fields: Map<String, Value>,
}

impl BillingPayload {
    fn new(operation: BillingOperation, client_id: &str, trx_id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("type".into(), Value::from(operation.as_str()));
        fields.insert("client_id".into(), Value::from(client_id));
        fields.insert("trx_id".into(), Value::from(trx_id));
        Self { fields }
    }

    fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.into(), Value::from(value));
        self
    }

    fn optional(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    fn build(self) -> Map<String, Value> {
        self.fields
    }
}
