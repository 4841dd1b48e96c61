//! DNS Message Builder
//!
//! Constructs PTR query messages in wire format using `hickory-proto`.

use ferrous_rdns_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive PTR query for `reverse_name` (e.g. `8.8.8.8.in-addr.arpa.`)
    ///
    /// Returns the random message ID alongside the bytes so the caller can match
    /// the response to this query.
    pub fn build_ptr_query(reverse_name: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(reverse_name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", reverse_name, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::PTR);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
