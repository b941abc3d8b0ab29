use ethers::prelude::Abigen;
use std::{env, path::Path};

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();

    // gen types for the order book (ERC-1155 + orders), from the contracts build directory
    let abi_source = "../contract/abi/OrderBook.json";
    println!("cargo:rerun-if-changed={abi_source}");

    let out_file = Path::new(&out_dir).join("order_book_contract.rs");
    if out_file.exists() {
        std::fs::remove_file(&out_file).unwrap();
    }

    Abigen::new("OrderBookContract", abi_source)
        .unwrap()
        .generate()
        .unwrap()
        .write_to_file(out_file)
        .unwrap();
}
