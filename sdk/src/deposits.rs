//! Portal input payloads and the notices the reference wallet dapp emits for them.
//!
//! Portals encode their inputs with `abi.encodePacked`, so fields are read at fixed offsets:
//! addresses take 20 bytes, `bool` one byte and `uint256` 32 bytes. Whatever follows the fixed
//! part is opaque to the portal and kept as is.
use alloy_primitives::{Address, Bytes, U256};

use crate::error::{SdkError, SdkResult};

const ADDRESS_LEN: usize = 20;
const UINT_LEN: usize = 32;

struct PackedReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> PackedReader<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    fn take(&mut self, len: usize, field: &str) -> SdkResult<&'a [u8]> {
        let end = self.offset + len;
        let bytes = self.payload.get(self.offset..end).ok_or_else(|| {
            SdkError::DepositPayload(format!(
                "payload of {} bytes is too short for {} at offset {}",
                self.payload.len(),
                field,
                self.offset
            ))
        })?;
        self.offset = end;
        Ok(bytes)
    }

    fn bool(&mut self, field: &str) -> SdkResult<bool> {
        match self.take(1, field)?[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SdkError::DepositPayload(format!("{} is not a bool: {}", field, other))),
        }
    }

    fn address(&mut self, field: &str) -> SdkResult<Address> {
        Ok(Address::from_slice(self.take(ADDRESS_LEN, field)?))
    }

    fn uint(&mut self, field: &str) -> SdkResult<U256> {
        Ok(U256::from_be_slice(self.take(UINT_LEN, field)?))
    }

    fn rest(self) -> Bytes {
        Bytes::copy_from_slice(&self.payload[self.offset..])
    }
}

/// Lowercase `0x` hex, the way the wallet dapp prints addresses.
fn lower_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtherDepositInput {
    pub sender: Address,
    pub value: U256,
    pub exec_layer_data: Bytes,
}

impl EtherDepositInput {
    pub fn decode(payload: &[u8]) -> SdkResult<Self> {
        let mut reader = PackedReader::new(payload);
        let sender = reader.address("sender")?;
        let value = reader.uint("value")?;
        Ok(Self { sender, value, exec_layer_data: reader.rest() })
    }

    pub fn notice(&self) -> String {
        format!("Received an {} ETHER deposit from {}.", self.value, lower_hex(&self.sender))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20DepositInput {
    /// Result of the token's `transferFrom`.
    pub success: bool,
    pub token: Address,
    pub sender: Address,
    pub amount: U256,
    pub exec_layer_data: Bytes,
}

impl Erc20DepositInput {
    pub fn decode(payload: &[u8]) -> SdkResult<Self> {
        let mut reader = PackedReader::new(payload);
        let success = reader.bool("success")?;
        let token = reader.address("token")?;
        let sender = reader.address("sender")?;
        let amount = reader.uint("amount")?;
        Ok(Self { success, token, sender, amount, exec_layer_data: reader.rest() })
    }

    pub fn notice(&self) -> String {
        format!("Received an {} ERC20({}) deposit from {}.", self.amount, lower_hex(&self.token), lower_hex(&self.sender))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc721DepositInput {
    pub token: Address,
    pub sender: Address,
    pub token_id: U256,
    /// `abi.encode(baseLayerData, execLayerData)`.
    pub data: Bytes,
}

impl Erc721DepositInput {
    pub fn decode(payload: &[u8]) -> SdkResult<Self> {
        let mut reader = PackedReader::new(payload);
        let token = reader.address("token")?;
        let sender = reader.address("sender")?;
        let token_id = reader.uint("token id")?;
        Ok(Self { token, sender, token_id, data: reader.rest() })
    }

    pub fn notice(&self) -> String {
        format!(
            "Received the deposit of ERC721({}) token {} from {}.",
            lower_hex(&self.token),
            self.token_id,
            lower_hex(&self.sender)
        )
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use assert_matches::assert_matches;
    use rstest::rstest;

    use super::*;

    const TOKEN: Address = address!("ae7f61eCf06C65405560166b259C54031428A9C4");
    const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn packed(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[rstest]
    fn erc20_payload_and_notice() {
        let amount = U256::from(500u64).to_be_bytes::<32>();
        let payload = packed(&[&[1], TOKEN.as_slice(), SENDER.as_slice(), &amount, b"extra"]);

        let input = Erc20DepositInput::decode(&payload).unwrap();

        assert!(input.success);
        assert_eq!(input.token, TOKEN);
        assert_eq!(input.amount, U256::from(500u64));
        assert_eq!(&input.exec_layer_data[..], b"extra");
        assert_eq!(
            input.notice(),
            "Received an 500 ERC20(0xae7f61ecf06c65405560166b259c54031428a9c4) deposit from \
             0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266."
        );
    }

    #[rstest]
    fn ether_notice_prints_wei() {
        let value = U256::from(1_000_000_000_000_000_000u128).to_be_bytes::<32>();
        let input = EtherDepositInput::decode(&packed(&[SENDER.as_slice(), &value])).unwrap();

        assert!(input.exec_layer_data.is_empty());
        assert_eq!(
            input.notice(),
            "Received an 1000000000000000000 ETHER deposit from 0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266."
        );
    }

    #[rstest]
    fn erc721_notice_names_token_id() {
        let id = U256::from(7u64).to_be_bytes::<32>();
        let input = Erc721DepositInput::decode(&packed(&[TOKEN.as_slice(), SENDER.as_slice(), &id])).unwrap();

        assert_eq!(
            input.notice(),
            "Received the deposit of ERC721(0xae7f61ecf06c65405560166b259c54031428a9c4) token 7 from \
             0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266."
        );
    }

    #[rstest]
    #[case(&[1u8; 10][..])]
    #[case(&[][..])]
    fn truncated_payloads_are_rejected(#[case] payload: &[u8]) {
        assert_matches!(Erc20DepositInput::decode(payload), Err(SdkError::DepositPayload(_)));
    }

    #[rstest]
    fn invalid_bool_is_rejected() {
        let payload = packed(&[&[2], TOKEN.as_slice(), SENDER.as_slice(), &[0u8; 32]]);
        assert_matches!(Erc20DepositInput::decode(&payload), Err(SdkError::DepositPayload(msg)) if msg.contains("success"));
    }
}
