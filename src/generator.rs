use super::*;

/// Turns block templates into distributable jobs. Owns the process-wide job
/// id counter, so ids stay unique however many submission handlers race with
/// job creation.
pub struct WorkGenerator {
    job_ids: AtomicU64,
}

impl WorkGenerator {
    pub fn new() -> Self {
        Self {
            job_ids: AtomicU64::new(0),
        }
    }

    pub fn generate(
        &self,
        template: Option<Arc<BlockTemplate>>,
        chain_name: &str,
        arbitrary: &[u8],
        payout_script: ScriptBuf,
        reserved_extranonce_size: usize,
    ) -> Result<(BitcoinBlock, Work)> {
        let chain = chain::lookup(chain_name)?;
        self.generate_for_chain(
            template,
            chain,
            arbitrary,
            payout_script,
            reserved_extranonce_size,
        )
    }

    pub fn generate_for_chain(
        &self,
        template: Option<Arc<BlockTemplate>>,
        chain: Arc<dyn Chain>,
        arbitrary: &[u8],
        payout_script: ScriptBuf,
        reserved_extranonce_size: usize,
    ) -> Result<(BitcoinBlock, Work)> {
        let template = template.context(MissingTemplateSnafu)?;

        ensure!(
            !chain.requires_transactions() || !template.transactions.is_empty(),
            EmptyTemplateSnafu
        );

        let prevhash = PrevHash::from(template.previous_block_hash);

        let (_coinbase, coinb1, coinb2) = CoinbaseBuilder::new(
            template.height,
            template.coinbase_value,
            payout_script,
            reserved_extranonce_size,
        )
        .with_arbitrary(arbitrary.to_vec())
        .with_witness_commitment(template.default_witness_commitment.clone())
        .build()?;

        let merkle_steps = template.merkle_steps();

        let job_id = JobId::new(self.job_ids.fetch_add(1, Ordering::Relaxed));

        debug!(
            "Generated job {} for height {} on {}",
            job_id,
            template.height,
            chain.name()
        );

        let work = Work {
            job_id,
            prevhash,
            coinb1: coinb1.clone(),
            coinb2: coinb2.clone(),
            merkle_steps: merkle_steps.clone(),
            version: template.version,
            nbits: template.bits,
            ntime: Ntime::from(template.current_time),
        };

        let block = BitcoinBlock {
            chain,
            job_id,
            prevhash,
            coinb1,
            coinb2,
            merkle_steps,
            version: template.version,
            nbits: template.bits,
            ntime: Ntime::from(template.current_time),
            extranonce_size: Some(reserved_extranonce_size),
            template: Some(template),
            sealed: None,
        };

        Ok((block, work))
    }
}

impl Default for WorkGenerator {
    fn default() -> Self {
        Self::new()
    }
}
