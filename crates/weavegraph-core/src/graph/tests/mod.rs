mod edge_table_tests;
mod fixtures;
mod graph_policy_tests;
