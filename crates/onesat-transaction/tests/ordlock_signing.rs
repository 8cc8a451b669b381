use onesat_primitives::ec::{PrivateKey, Signature};
use onesat_script::ordlock::{OrdLockData, Payout};
use onesat_script::Script;
use onesat_transaction::sighash::calc_preimage;
use onesat_transaction::template::ordlock;
use onesat_transaction::template::UnlockingScriptTemplate;
use onesat_transaction::{InputRole, Outpoint, Transaction, TransactionInput, TransactionOutput};

fn listing() -> (OrdLockData, Script) {
    let data = OrdLockData::new(
        [0x44; 20],
        Payout {
            satoshis: 100_000,
            locking_script: Script::p2pkh(&[0x55; 20]),
        },
    );
    let script = data.lock().unwrap();
    (data, script)
}

fn purchase_tx() -> Transaction {
    let (data, script) = listing();
    let mut tx = Transaction::new();
    tx.add_input(TransactionInput::spending(
        &Outpoint::new([1; 32], 0),
        TransactionOutput::new(1, script),
    ));
    tx.add_output(TransactionOutput::new(1, Script::p2pkh(&[0x66; 20])));
    tx.add_output(TransactionOutput::from(&data.payout));
    tx.add_output(TransactionOutput::new(5_000, Script::p2pkh(&[0x66; 20])));
    tx.add_output(TransactionOutput::new(4_000, Script::p2pkh(&[0x77; 20])));
    tx
}

#[test]
fn purchase_unlock_pushes_outputs_and_preimage() {
    let tx = purchase_tx();
    let unlock = ordlock::purchase().sign(&tx, 0).unwrap();
    let chunks = unlock.chunks().unwrap();
    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks[0].data.as_deref(), Some(&tx.outputs[0].to_bytes()[..]));

    let mut rest = tx.outputs[2].to_bytes();
    rest.extend(tx.outputs[3].to_bytes());
    assert_eq!(chunks[1].data.as_deref(), Some(&rest[..]));

    let source = tx.inputs[0].source_output().unwrap();
    let expected = calc_preimage(
        &tx,
        0,
        source.locking_script.to_bytes(),
        0xc1,
        source.satoshis,
    )
    .unwrap();
    assert_eq!(chunks[2].data.as_deref(), Some(&expected[..]));
    assert_eq!(chunks[3].op, 0x00);
    assert_eq!(*expected.last().unwrap(), 0x00);
    assert_eq!(expected[expected.len() - 4], 0xc1);
}

#[test]
fn purchase_preimage_changes_with_output_values() {
    let mut tx = purchase_tx();
    let first = ordlock::purchase().sign(&tx, 0).unwrap();
    tx.outputs[2].satoshis += 1;
    let second = ordlock::purchase().sign(&tx, 0).unwrap();
    assert_ne!(first, second);
}

#[test]
fn cancel_unlock_signs_single_anyonecanpay() {
    let key = PrivateKey::generate();
    let (_, script) = listing();
    let mut tx = Transaction::new();
    tx.add_input(TransactionInput::spending(
        &Outpoint::new([1; 32], 0),
        TransactionOutput::new(1, script),
    ));
    tx.add_output(TransactionOutput::new(1, Script::p2pkh(&key.pub_key().hash160())));

    let template = ordlock::cancel(key.clone());
    tx.sign_input(0, &template).unwrap();
    let unlock = tx.inputs[0].unlocking_script.clone().unwrap();
    let chunks = unlock.chunks().unwrap();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[2].op, 0x51);
    assert!(unlock.len() <= template.estimate_length(&tx, 0));

    let sig = chunks[0].data.clone().unwrap();
    assert_eq!(*sig.last().unwrap() as u32, InputRole::ListingCancel.sighash_flag());
    let digest = tx
        .calc_input_signature_hash(0, InputRole::ListingCancel.sighash_flag())
        .unwrap();
    let der = Signature::from_der(&sig[..sig.len() - 1]).unwrap();
    assert!(key.pub_key().verify(&digest, &der));
}

#[test]
fn purchase_requires_payout_output() {
    let mut tx = purchase_tx();
    tx.outputs.truncate(1);
    assert!(ordlock::purchase().sign(&tx, 0).is_err());
}
