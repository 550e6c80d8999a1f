fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=proto/node.proto");
    println!("cargo:rerun-if-changed=proto/router.proto");

    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/node.proto", "proto/router.proto"], &["./proto"])?;

    Ok(())
}
