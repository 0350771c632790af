use {
    crate::{deterministic_keypair, load_split_protocol, standard_allocations},
    anchor_lang::{AccountDeserialize, InstructionData as _, ToAccountMetas as _},
    litesvm::{
        types::{FailedTransactionMetadata, TransactionResult},
        LiteSVM,
    },
    litesvm_token::spl_token::solana_program::native_token::LAMPORTS_PER_SOL,
    solana_account::Account,
    solana_instruction::Instruction,
    solana_keypair::Keypair,
    solana_message::Message,
    solana_pubkey::Pubkey,
    solana_signer::Signer as _,
    solana_system_interface::instruction as system_instruction,
    solana_transaction::Transaction,
    spl_associated_token_account::instruction::create_associated_token_account_idempotent,
    spl_token::{
        native_mint,
        solana_program::{program_option::COption, program_pack::Pack},
        state::{Account as TokenAccount, Mint},
    },
    split_protocol::{
        AllocationLeaf, ClaimReceiptV0, LeafId, SplitSetup, SplitV0, PERCENTAGE_SCALE,
    },
    split_protocol_csvs::{AllocationCsvRow, AllocationRows, IndexedAllocationCsvRow},
    split_protocol_sdk::{
        build_claim_for_all_windows_v0_ix, build_claim_token_for_all_v0_ix, build_claim_v0_ix,
        build_create_split_v0_ix, build_increment_then_claim_all_v0_ix,
        build_increment_window_v0_ix, build_swap_owner_v0_ix, compile_split, AddressFinder,
        CompiledClaim, CompiledSplit,
    },
};

/// A LiteSVM with the split program loaded, plus helpers that drive splits the way
/// a client would: compile allocations, deploy, fund, close windows and claim.
///
/// `payer` pays fees and receipt rent for every transaction; `creator` deploys
/// splits and is their default owner.
pub struct TestFixture {
    pub payer: Keypair,
    pub creator: Keypair,
    pub address_finder: AddressFinder,

    log_send_transaction_results: bool,
    svm: LiteSVM,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let mut svm = LiteSVM::new();
        load_split_protocol(&mut svm);
        install_native_mint(&mut svm);

        let mut fixture = Self {
            payer: deterministic_keypair("payer"),
            creator: deterministic_keypair("creator"),
            address_finder: AddressFinder::default(),
            log_send_transaction_results: true,
            svm,
        };

        fixture.airdrop(&fixture.payer.pubkey(), LAMPORTS_PER_SOL * 10_000);
        fixture.airdrop(&fixture.creator.pubkey(), LAMPORTS_PER_SOL * 10);
        fixture
    }

    pub fn airdrop(&mut self, to: &Pubkey, amount: u64) {
        self.svm
            .airdrop(to, amount)
            .unwrap_or_else(|e| panic!("Failed to airdrop to {amount} {to}: {e:?}"));
    }

    /// A deterministic keypair with enough lamports to sign and pay window rent.
    pub fn funded_keypair(&mut self, identifier: &str) -> Keypair {
        let keypair = deterministic_keypair(identifier);
        self.airdrop(&keypair.pubkey(), LAMPORTS_PER_SOL);
        keypair
    }

    pub fn latest_blockhash(&self) -> solana_hash::Hash {
        self.svm.latest_blockhash()
    }

    pub fn disable_send_transaction_logging(&mut self) {
        self.log_send_transaction_results = false;
    }

    pub fn enable_send_transaction_logging(&mut self) {
        self.log_send_transaction_results = true;
    }

    pub fn send_instructions(&mut self, instructions: &[Instruction]) -> TransactionResult {
        self.send_instructions_with_signers(instructions, &[])
    }

    /// `payer` is always the fee payer; `signers` are added after it.
    pub fn send_instructions_with_signers(
        &mut self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> TransactionResult {
        // Identical retries must not be rejected as already processed
        self.svm.expire_blockhash();

        let mut all_signers: Vec<&Keypair> = vec![&self.payer];
        all_signers.extend(
            signers
                .iter()
                .copied()
                .filter(|signer| signer.pubkey() != self.payer.pubkey()),
        );

        let tx = Transaction::new(
            all_signers.as_slice(),
            Message::new(instructions, Some(&self.payer.pubkey())),
            self.latest_blockhash(),
        );

        self.send_transaction(tx)
    }

    /// Send a transaction and optionally print logs based on the logging_enabled setting
    pub fn send_transaction(&mut self, tx: Transaction) -> TransactionResult {
        let result = self.svm.send_transaction(tx);

        if self.log_send_transaction_results {
            match &result {
                Ok(meta) => {
                    println!("=== Transaction Logs (Success) ===");
                    for (i, log) in meta.logs.iter().enumerate() {
                        println!("{}: {}", i, log);
                    }
                    println!("=== End Logs ===\n");
                }
                Err(failed_meta) => {
                    println!("=== Transaction Logs (Failed) ===");
                    for (i, log) in failed_meta.meta.logs.iter().enumerate() {
                        println!("{}: {}", i, log);
                    }
                    println!("Error: {:?}", failed_meta.err);
                    println!("=== End Logs ===\n");
                }
            }
        }

        result
    }

    // ============================================================================================
    // Compilation
    // ============================================================================================

    pub fn compile(&self, allocations: &[(Pubkey, u64)]) -> CompiledSplit {
        self.compile_with_scale(allocations, PERCENTAGE_SCALE)
    }

    pub fn compile_with_scale(&self, allocations: &[(Pubkey, u64)], scale: u64) -> CompiledSplit {
        let rows = AllocationRows::V1(
            allocations
                .iter()
                .map(|(account, allocation)| AllocationCsvRow {
                    account: *account,
                    allocation: *allocation,
                })
                .collect(),
        );
        compile_split(self.address_finder.program_id, &rows, scale)
            .expect("Failed to compile allocations")
    }

    /// Scheme v2: leaf `i` is `allocations[i]`.
    pub fn compile_indexed(&self, allocations: &[(Pubkey, u64)]) -> CompiledSplit {
        let rows = AllocationRows::V2(
            (0u64..)
                .zip(allocations.iter())
                .map(|(index, (account, allocation))| IndexedAllocationCsvRow {
                    index,
                    account: *account,
                    allocation: *allocation,
                })
                .collect(),
        );
        compile_split(self.address_finder.program_id, &rows, PERCENTAGE_SCALE)
            .expect("Failed to compile indexed allocations")
    }

    // ============================================================================================
    // Deployment
    // ============================================================================================

    pub fn default_setup(&self, compiled: &CompiledSplit) -> SplitSetup {
        SplitSetup::new(vec![self.creator.pubkey()])
            .with_leaf_scheme(compiled.leaf_scheme)
            .with_scale(compiled.scale)
    }

    pub fn try_deploy(
        &mut self,
        compiled: &CompiledSplit,
        setup: SplitSetup,
    ) -> Result<Pubkey, FailedTransactionMetadata> {
        let (ix, _, _) = build_create_split_v0_ix(
            &self.address_finder,
            self.creator.pubkey(),
            compiled.merkle_root,
            setup,
            format!("{} recipients", compiled.claims.len()),
        )
        .expect("Failed to build create_split_v0 ix");

        let creator = self.creator.insecure_clone();
        self.send_instructions_with_signers(&[ix], &[&creator])?;
        Ok(compiled.split_address)
    }

    pub fn deploy(&mut self, compiled: &CompiledSplit) -> Result<Pubkey, FailedTransactionMetadata> {
        let setup = self.default_setup(compiled);
        self.try_deploy(compiled, setup)
    }

    /// Compile and deploy the 10/30/60 split.
    pub fn deploy_standard_split(&mut self) -> (CompiledSplit, Pubkey) {
        let compiled = self.compile(&standard_allocations());
        let split = self
            .deploy(&compiled)
            .expect("Standard split should deploy");
        (compiled, split)
    }

    // ============================================================================================
    // Funding & windows
    // ============================================================================================

    /// Send native value to an account, as an outside payer would.
    pub fn fund(&mut self, to: &Pubkey, amount: u64) {
        let ix = system_instruction::transfer(&self.payer.pubkey(), to, amount);
        self.send_instructions(&[ix])
            .expect("Funding transfer should succeed");
    }

    /// Returns the index of the window that was closed.
    pub fn try_increment_window(
        &mut self,
        split: &Pubkey,
        caller: &Keypair,
    ) -> Result<u64, FailedTransactionMetadata> {
        let window = self.split_state(split).current_window();
        let (ix, _, _) = build_increment_window_v0_ix(&self.address_finder, caller.pubkey(), *split)
            .expect("Failed to build increment_window_v0 ix");

        self.send_instructions_with_signers(&[ix], &[caller])?;
        Ok(window)
    }

    /// Fund the split and close a window over the new funds.
    pub fn fund_window(&mut self, split: &Pubkey, amount: u64) -> u64 {
        self.fund(split, amount);
        let creator = self.creator.insecure_clone();
        self.try_increment_window(split, &creator)
            .expect("Window should close over fresh funds")
    }

    /// Lamports the next window would snapshot.
    pub fn available_for_window(&self, split: &Pubkey) -> u64 {
        let account = self.fetch_account(split).expect("Split account should exist");
        let state = self.split_state(split);
        let rent_minimum = self
            .svm
            .minimum_balance_for_rent_exemption(account.data.len());
        state
            .available_for_window(account.lamports.saturating_sub(rent_minimum))
            .unwrap_or(0)
    }

    // ============================================================================================
    // Claims
    // ============================================================================================
    //
    // Claim helpers return the lamports credited directly to the recipient. A payout
    // delivered as wrapped native tokens credits 0 lamports.

    pub fn try_claim(
        &mut self,
        compiled: &CompiledSplit,
        account: &Pubkey,
        window: u64,
    ) -> Result<u64, FailedTransactionMetadata> {
        let claim = compiled
            .claim_for_account(account)
            .expect("Account should be part of the compiled split")
            .clone();
        self.try_claim_leaf(compiled, &claim, window)
    }

    pub fn try_claim_leaf(
        &mut self,
        compiled: &CompiledSplit,
        claim: &CompiledClaim,
        window: u64,
    ) -> Result<u64, FailedTransactionMetadata> {
        let wrapped = self.existing_wrapped_account(&claim.account);
        let (ix, _, _) = build_claim_v0_ix(
            &self.address_finder,
            self.payer.pubkey(),
            compiled,
            claim,
            window,
            wrapped,
        )
        .expect("Failed to build claim_v0 ix");

        self.send_and_measure(&[ix], &claim.account)
    }

    pub fn try_claim_for_all_windows(
        &mut self,
        compiled: &CompiledSplit,
        account: &Pubkey,
    ) -> Result<u64, FailedTransactionMetadata> {
        let claim = compiled
            .claim_for_account(account)
            .expect("Account should be part of the compiled split");
        let window_count = self.split_state(&compiled.split_address).current_window();
        let (ix, _, _) = build_claim_for_all_windows_v0_ix(
            &self.address_finder,
            self.payer.pubkey(),
            compiled,
            claim,
            window_count,
            self.existing_wrapped_account(account),
        )
        .expect("Failed to build claim_for_all_windows_v0 ix");

        self.send_and_measure(&[ix], account)
    }

    pub fn try_increment_then_claim_all(
        &mut self,
        compiled: &CompiledSplit,
        account: &Pubkey,
    ) -> Result<u64, FailedTransactionMetadata> {
        let claim = compiled
            .claim_for_account(account)
            .expect("Account should be part of the compiled split");
        let split = &compiled.split_address;
        let mut window_count = self.split_state(split).current_window();
        if self.available_for_window(split) > 0 {
            window_count += 1;
        }
        let (ix, _, _) = build_increment_then_claim_all_v0_ix(
            &self.address_finder,
            self.payer.pubkey(),
            compiled,
            claim,
            window_count,
            self.existing_wrapped_account(account),
        )
        .expect("Failed to build increment_then_claim_all_v0 ix");

        self.send_and_measure(&[ix], account)
    }

    pub fn try_claim_token_for_all(
        &mut self,
        compiled: &CompiledSplit,
        caller: &Keypair,
        mint: &Pubkey,
    ) -> TransactionResult {
        let (ix, _, _) =
            build_claim_token_for_all_v0_ix(&self.address_finder, caller.pubkey(), compiled, *mint)
                .expect("Failed to build claim_token_for_all_v0 ix");

        self.send_instructions_with_signers(&[ix], &[caller])
    }

    pub fn try_swap_owner(
        &mut self,
        split: &Pubkey,
        caller: &Keypair,
        prev_owner: &Pubkey,
        old_owner: &Pubkey,
        new_owner: &Pubkey,
    ) -> TransactionResult {
        let (ix, _, _) = build_swap_owner_v0_ix(
            &self.address_finder,
            caller.pubkey(),
            *split,
            *prev_owner,
            *old_owner,
            *new_owner,
        )
        .expect("Failed to build swap_owner_v0 ix");

        self.send_instructions_with_signers(&[ix], &[caller])
    }

    /// Claim with an arbitrary leaf and proof, bypassing the compiled split.
    pub fn try_claim_with_leaf(
        &mut self,
        split: &Pubkey,
        window: u64,
        leaf: AllocationLeaf,
        proof: Vec<[u8; 32]>,
    ) -> Result<u64, FailedTransactionMetadata> {
        let recipient = leaf.account();
        let (claim_receipt, _) =
            self.address_finder
                .find_claim_receipt_v0_address(split, window, &leaf.leaf_id());

        let ix_accounts = split_protocol::accounts::ClaimV0 {
            payer: self.payer.pubkey(),
            split: *split,
            recipient,
            claim_receipt,
            recipient_wrapped_account: None,
            token_program: None,
            system_program: self.address_finder.system_program_id,
        };
        let ix_data = split_protocol::instruction::ClaimV0 {
            window,
            leaf,
            proof,
        };
        let ix = Instruction {
            program_id: self.address_finder.program_id,
            accounts: ix_accounts.to_account_metas(None),
            data: ix_data.data(),
        };

        self.send_and_measure(&[ix], &recipient)
    }

    fn send_and_measure(
        &mut self,
        instructions: &[Instruction],
        recipient: &Pubkey,
    ) -> Result<u64, FailedTransactionMetadata> {
        let before = self.balance(recipient);
        self.send_instructions(instructions)?;
        Ok(self.balance(recipient).saturating_sub(before))
    }

    fn existing_wrapped_account(&self, owner: &Pubkey) -> Option<Pubkey> {
        let wrapped = self.address_finder.find_wrapped_native_address(owner);
        self.account_exists(&wrapped).then_some(wrapped)
    }

    // ============================================================================================
    // Tokens
    // ============================================================================================

    /// Create a mint whose authority is `payer`.
    pub fn create_mint(&mut self, mint_keypair: &Keypair, decimals: u8) -> TransactionResult {
        let payer = self.payer.pubkey();
        let mint = mint_keypair.pubkey();
        let lamports = self.svm.minimum_balance_for_rent_exemption(Mint::LEN);

        let create_ix = system_instruction::create_account(
            &payer,
            &mint,
            lamports,
            Mint::LEN as u64,
            &spl_token::ID,
        );
        let initialize_ix =
            spl_token::instruction::initialize_mint2(&spl_token::ID, &mint, &payer, None, decimals)
                .expect("Failed to build initialize_mint2 ix");

        self.send_instructions_with_signers(&[create_ix, initialize_ix], &[mint_keypair])
    }

    /// Create `owner`'s associated token account for `mint` if it is missing.
    pub fn create_token_account(&mut self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        let ix = create_associated_token_account_idempotent(
            &self.payer.pubkey(),
            owner,
            mint,
            &self.address_finder.token_program_id,
        );
        self.send_instructions(&[ix])
            .expect("Associated token account creation should succeed");
        self.address_finder.find_token_account_address(owner, mint)
    }

    /// The wrapped-native account a refused payout falls back to.
    pub fn create_wrapped_native_account(&mut self, owner: &Pubkey) -> Pubkey {
        self.create_token_account(owner, &native_mint::ID)
    }

    pub fn mint_to(&mut self, mint: &Pubkey, to: &Pubkey, amount: u64) -> TransactionResult {
        let mint_ix = spl_token::instruction::mint_to(
            &self.address_finder.token_program_id,
            mint,
            to,
            &self.payer.pubkey(),
            &[&self.payer.pubkey()],
            amount,
        )
        .expect("Failed to build mint_to instruction");

        self.send_instructions(&[mint_ix])
    }

    // ============================================================================================
    // Inspection
    // ============================================================================================

    pub fn fetch_account(&self, address: &Pubkey) -> Option<Account> {
        self.svm.get_account(address)
    }

    /// Check if an account exists
    pub fn account_exists(&self, address: &Pubkey) -> bool {
        self.svm
            .get_account(address)
            .is_some_and(|account| account.lamports > 0)
    }

    pub fn fetch_split(&self, split: &Pubkey) -> Option<SplitV0> {
        self.fetch_account(split)
            .and_then(|a| SplitV0::try_deserialize(&mut &a.data[..]).ok())
    }

    pub fn split_state(&self, split: &Pubkey) -> SplitV0 {
        self.fetch_split(split).expect("Split should be deployed")
    }

    pub fn fetch_claim_receipt(&self, claim_receipt_address: &Pubkey) -> Option<ClaimReceiptV0> {
        self.fetch_account(claim_receipt_address)
            .and_then(|a| ClaimReceiptV0::try_deserialize(&mut &a.data[..]).ok())
    }

    pub fn is_claimed(&self, split: &Pubkey, window: u64, leaf_id: &LeafId) -> bool {
        let (receipt, _) = self
            .address_finder
            .find_claim_receipt_v0_address(split, window, leaf_id);
        self.fetch_claim_receipt(&receipt)
            .is_some_and(|receipt| receipt.claimed)
    }

    pub fn balance(&self, account: &Pubkey) -> u64 {
        self.fetch_account(account)
            .map(|account| account.lamports)
            .unwrap_or(0)
    }

    pub fn rent_minimum(&self, data_len: usize) -> u64 {
        self.svm.minimum_balance_for_rent_exemption(data_len)
    }

    /// Balance of `owner`'s associated token account for `mint`, 0 if it does not exist.
    pub fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        let token_account = self.address_finder.find_token_account_address(owner, mint);
        self.fetch_account(&token_account)
            .and_then(|account| TokenAccount::unpack(&account.data).ok())
            .map(|token_account| token_account.amount)
            .unwrap_or(0)
    }
}

/// Make sure the wrapped-native mint exists so wrapped token accounts can be created.
fn install_native_mint(svm: &mut LiteSVM) {
    if svm.get_account(&native_mint::ID).is_some() {
        return;
    }

    let mut data = vec![0u8; Mint::LEN];
    Mint {
        mint_authority: COption::None,
        supply: 0,
        decimals: native_mint::DECIMALS,
        is_initialized: true,
        freeze_authority: COption::None,
    }
    .pack_into_slice(&mut data);

    let native_mint_account = Account {
        lamports: svm.minimum_balance_for_rent_exemption(Mint::LEN),
        data,
        owner: spl_token::ID,
        executable: false,
        rent_epoch: 0,
    };
    svm.set_account(native_mint::ID, native_mint_account)
        .unwrap_or_else(|e| panic!("Failed to install the native mint: {e:?}"));
}
