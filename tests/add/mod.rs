mod rm_unstages_without_touching_working_tree;
