//! Where each entry point leaves the assigned input index in its receipt.
use alloy_primitives::{keccak256, Address, B256, U256};
use rollups_chain_client_interface::{ReceiptLog, SubmissionReceipt};

/// `InputAdded(address indexed dapp, uint256 indexed inputIndex, address sender, bytes input)`
pub const INPUT_ADDED_SIGNATURE: &str = "InputAdded(address,uint256,address,bytes)";

/// Contract a submission is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, strum_macros::Display)]
pub enum EntryPoint {
    InputBox,
    EtherPortal,
    Erc20Portal,
    Erc721Portal,
    DAppAddressRelay,
}

/// Slot of a log that carries a 32-byte word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordPosition {
    /// `topics[n]`. Topic 0 is the event selector.
    Topic(usize),
    /// `data[32 * n..32 * (n + 1)]`. For contracts that emit the index as an unindexed event
    /// argument; no v1 entry point needs it.
    DataWord(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLocation {
    /// Canonical event signature, hashed into topic 0.
    pub event_signature: &'static str,
    pub position: WordPosition,
    /// Topic slot holding the dapp address, used to skip inputs sent to other dapps.
    pub dapp_topic: Option<usize>,
}

impl IndexLocation {
    pub fn topic0(&self) -> B256 {
        keccak256(self.event_signature.as_bytes())
    }
}

/// Every portal and the relay forward to the input box, so all of them surface the index through
/// the input box's `InputAdded` event.
pub fn index_location(entry_point: EntryPoint) -> IndexLocation {
    match entry_point {
        EntryPoint::InputBox
        | EntryPoint::EtherPortal
        | EntryPoint::Erc20Portal
        | EntryPoint::Erc721Portal
        | EntryPoint::DAppAddressRelay => IndexLocation {
            event_signature: INPUT_ADDED_SIGNATURE,
            position: WordPosition::Topic(2),
            dapp_topic: Some(1),
        },
    }
}

/// Input index assigned by the input box, read from the first matching log emitted by
/// `input_box` for `dapp`.
pub fn extract_input_index(
    entry_point: EntryPoint,
    receipt: &SubmissionReceipt,
    input_box: Address,
    dapp: Address,
) -> Option<u64> {
    let location = index_location(entry_point);
    let topic0 = location.topic0();
    let dapp_word = dapp.into_word();

    receipt
        .logs
        .iter()
        .filter(|log| log.address == input_box)
        .filter(|log| log.topics.first() == Some(&topic0))
        .filter(|log| location.dapp_topic.map_or(true, |slot| log.topics.get(slot) == Some(&dapp_word)))
        .find_map(|log| read_word(log, location.position))
        .and_then(|word| u64::try_from(U256::from_be_bytes(word.0)).ok())
}

fn read_word(log: &ReceiptLog, position: WordPosition) -> Option<B256> {
    match position {
        WordPosition::Topic(slot) => log.topics.get(slot).copied(),
        WordPosition::DataWord(n) => {
            let start = n.checked_mul(32)?;
            log.data.get(start..start + 32).map(B256::from_slice)
        }
    }
}
