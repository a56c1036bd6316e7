use crypto_bigint::U256;
use dlog_protocols::{
    DlogGroup, LocalChannel, PedersenCommitter, PedersenReceiver, Ristretto255Group,
    SigmaDhCommonInput, SigmaDhProver, SigmaDhProverInput, SigmaDhVerifier,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_committed_value_opens_to_itself(value in any::<u64>(), id in any::<i64>()) {
        let dlog = Ristretto255Group;
        let (committer_end, receiver_end) = LocalChannel::pair();
        let mut receiver = PedersenReceiver::new(dlog.clone(), receiver_end).unwrap();
        let mut committer = PedersenCommitter::new(dlog, committer_end).unwrap();

        let x = U256::from_u64(value);
        committer.commit(&x, id).unwrap();
        let output = receiver.receive_commitment().unwrap();
        prop_assert_eq!(output.id(), id);

        committer.decommit(id).unwrap();
        prop_assert_eq!(receiver.receive_decommitment(id).unwrap(), Some(x));
    }

    #[test]
    fn any_witness_proves_its_own_statement(witness in 1u64.., exponent in 1u64..) {
        let dlog = Ristretto255Group;
        let w = U256::from_u64(witness);
        let g = dlog.generator();
        let h = dlog.exponentiate(&g, &U256::from_u64(exponent));
        let u = dlog.exponentiate(&g, &w);
        let v = dlog.exponentiate(&h, &w);
        let common = SigmaDhCommonInput::new(h, u, v);

        let mut prover = SigmaDhProver::new(dlog.clone(), 80).unwrap();
        let mut verifier = SigmaDhVerifier::new(dlog, 80).unwrap();

        let first = prover
            .compute_first_msg(SigmaDhProverInput::new(common.clone(), w))
            .unwrap();
        let challenge = verifier.sample_challenge();
        let second = prover.compute_second_msg(&challenge).unwrap();

        prop_assert!(verifier.verify(&common, &first, &second).unwrap());
    }
}
