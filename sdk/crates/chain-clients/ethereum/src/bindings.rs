//! Solidity interfaces of the v1 rollups contracts, plus the token standards the portals move.

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IInputBox {
        event InputAdded(address indexed dapp, uint256 indexed inputIndex, address sender, bytes input);

        function addInput(address _dapp, bytes calldata _input) external returns (bytes32);
        function getNumberOfInputs(address _dapp) external view returns (uint256);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IEtherPortal {
        function depositEther(address _dapp, bytes calldata _execLayerData) external payable;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20Portal {
        function depositERC20Tokens(address _token, address _dapp, uint256 _amount, bytes calldata _execLayerData) external;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC721Portal {
        function depositERC721Token(
            address _token,
            address _dapp,
            uint256 _tokenId,
            bytes calldata _baseLayerData,
            bytes calldata _execLayerData
        ) external;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IDAppAddressRelay {
        function relayDAppAddress(address _dapp) external;
    }
}

sol! {
    #[allow(missing_docs)]
    struct OutputValidityProof {
        uint64 inputIndexWithinEpoch;
        uint64 outputIndexWithinInput;
        bytes32 outputHashesRootHash;
        bytes32 vouchersEpochRootHash;
        bytes32 noticesEpochRootHash;
        bytes32 machineStateHash;
        bytes32[] outputHashInOutputHashesSiblings;
        bytes32[] outputHashesInEpochSiblings;
    }

    #[allow(missing_docs)]
    struct Proof {
        OutputValidityProof validity;
        bytes context;
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    interface ICartesiDApp {
        event VoucherExecuted(uint256 voucherId);

        function executeVoucher(address _destination, bytes calldata _payload, Proof calldata _proof) external returns (bool);
        function wasVoucherExecuted(uint256 _inputIndex, uint256 _outputIndexWithinInput) external view returns (bool);
        function validateNotice(bytes calldata _notice, Proof calldata _proof) external view returns (bool);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC721 {
        function getApproved(uint256 tokenId) external view returns (address);
        function approve(address to, uint256 tokenId) external;
    }
}
