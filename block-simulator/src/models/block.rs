use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::fmt;

/// A single submitted transaction
///
/// Decoding is forgiving: keys match regardless of ASCII case, `null` or a
/// missing field leaves the zero value, and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Transaction {
    /// Caller-chosen identifier
    pub id: String,

    /// Gas consumed by this transaction
    #[serde(rename = "gasPrice")]
    pub gas_price: i64,

    /// Fee paid by this transaction
    pub fee: i64,
}

/// Body of a `/simulateBlock` request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlockRequest {
    /// Transactions in submission order
    pub transactions: Vec<Transaction>,
}

impl BlockRequest {
    /// Decode the first JSON value in `body`, ignoring anything after it
    ///
    /// A top-level `null` is an empty batch. An empty body is an error.
    pub fn from_first_value(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<BlockRequest>>()
            .next()
        {
            Some(value) => Ok(value?.unwrap_or_default()),
            // nothing but whitespace: let the parser report the EOF
            None => serde_json::from_slice::<BlockRequest>(body),
        }
    }

    /// Sum of `gasPrice` over every transaction, wrapping on overflow
    pub fn total_gas(&self) -> i64 {
        self.transactions
            .iter()
            .fold(0i64, |acc, tx| acc.wrapping_add(tx.gas_price))
    }

    /// Sum of `fee` over every transaction, wrapping on overflow
    pub fn total_fees(&self) -> i64 {
        self.transactions
            .iter()
            .fold(0i64, |acc, tx| acc.wrapping_add(tx.fee))
    }
}

/// Overwrite `slot` only when the incoming value is not `null`
fn assign<'de, A, T>(map: &mut A, slot: &mut T) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
    T: Deserialize<'de>,
{
    if let Some(value) = map.next_value::<Option<T>>()? {
        *slot = value;
    }
    Ok(())
}

struct TransactionVisitor;

impl<'de> Visitor<'de> for TransactionVisitor {
    type Value = Transaction;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a transaction object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Transaction, A::Error> {
        let mut tx = Transaction::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("id") {
                assign(&mut map, &mut tx.id)?;
            } else if key.eq_ignore_ascii_case("gasPrice") {
                assign(&mut map, &mut tx.gas_price)?;
            } else if key.eq_ignore_ascii_case("fee") {
                assign(&mut map, &mut tx.fee)?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(tx)
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TransactionVisitor)
    }
}

struct BlockRequestVisitor;

impl<'de> Visitor<'de> for BlockRequestVisitor {
    type Value = BlockRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a block request object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<BlockRequest, A::Error> {
        let mut request = BlockRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("transactions") {
                // null elements decode as zero-valued transactions
                let mut entries: Vec<Option<Transaction>> = Vec::new();
                assign(&mut map, &mut entries)?;
                request.transactions = entries.into_iter().map(Option::unwrap_or_default).collect();
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(request)
    }
}

impl<'de> Deserialize<'de> for BlockRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BlockRequestVisitor)
    }
}

/// Body of a successful `/simulateBlock` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    /// The decoded request, echoed back as-is
    pub transactions: BlockRequest,

    #[serde(rename = "totalGas")]
    pub total_gas: i64,

    #[serde(rename = "totalFees")]
    pub total_fees: i64,

    #[serde(rename = "gasLimit")]
    pub gas_limit: i64,

    /// Simulated work duration in seconds
    #[serde(rename = "processingTimeSeconds")]
    pub processing_time_seconds: f64,
}
